use crate::domain::Affiliation;

/// Which side of the marketplace an entrant is on, together with the affiliation that side
/// requires. A founder always has a company and never a firm, a lawyer the other way round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Founder { company: Affiliation },
    Lawyer { firm: Affiliation },
}

/// The bare discriminant of a `Role`, as it travels on the wire and in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Founder,
    Lawyer,
}

impl RoleKind {
    /// Only the exact lower-case literals are accepted.
    pub fn parse(s: &str) -> Option<RoleKind> {
        match s {
            "founder" => Some(Self::Founder),
            "lawyer" => Some(Self::Lawyer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Founder => "founder",
            Self::Lawyer => "lawyer",
        }
    }

    /// Name of the input field carrying the affiliation for this role.
    pub fn affiliation_field(&self) -> &'static str {
        match self {
            Self::Founder => "company",
            Self::Lawyer => "firm",
        }
    }

    pub fn affiliation_label(&self) -> &'static str {
        match self {
            Self::Founder => "Company name",
            Self::Lawyer => "Firm name",
        }
    }

    pub fn with_affiliation(self, affiliation: Affiliation) -> Role {
        match self {
            Self::Founder => Role::Founder {
                company: affiliation,
            },
            Self::Lawyer => Role::Lawyer { firm: affiliation },
        }
    }
}

impl Role {
    pub fn kind(&self) -> RoleKind {
        match self {
            Self::Founder { .. } => RoleKind::Founder,
            Self::Lawyer { .. } => RoleKind::Lawyer,
        }
    }

    pub fn company(&self) -> Option<&str> {
        match self {
            Self::Founder { company } => Some(company.as_ref()),
            Self::Lawyer { .. } => None,
        }
    }

    pub fn firm(&self) -> Option<&str> {
        match self {
            Self::Founder { .. } => None,
            Self::Lawyer { firm } => Some(firm.as_ref()),
        }
    }

    /// Rebuilds a `Role` from its flattened storage representation, rejecting any combination
    /// where the affiliation columns disagree with the discriminant.
    pub fn from_columns(
        role: &str,
        company: Option<String>,
        firm: Option<String>,
    ) -> Result<Role, String> {
        let kind = RoleKind::parse(role).ok_or_else(|| format!("{role} is not a known role."))?;
        let affiliation = match (kind, company, firm) {
            (RoleKind::Founder, Some(company), None) => company,
            (RoleKind::Lawyer, None, Some(firm)) => firm,
            (kind, _, _) => {
                return Err(format!(
                    "A {} must carry exactly one affiliation, its `{}`.",
                    kind.as_str(),
                    kind.affiliation_field()
                ))
            }
        };
        let affiliation = Affiliation::parse(affiliation, kind.affiliation_label())?;
        Ok(kind.with_affiliation(affiliation))
    }
}
