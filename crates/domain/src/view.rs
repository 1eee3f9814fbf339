use std::str::FromStr;

use ppe_portal_core::AppError;

/// Screens of the portal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    /// Landing menu.
    #[default]
    Home,
    /// New PPE request with safety approval.
    NewRequest,
    /// Storeman issuance against an existing request.
    StoremanIssuance,
    /// Requestor acknowledgement of receipt.
    Acknowledge,
}

impl View {
    /// Workflow views in menu order.
    pub const WORKFLOWS: [Self; 3] = [Self::NewRequest, Self::StoremanIssuance, Self::Acknowledge];

    /// Returns stable route value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::NewRequest => "new",
            Self::StoremanIssuance => "storeman",
            Self::Acknowledge => "ack",
        }
    }

    /// Returns the screen heading.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "PPE Request Portal",
            Self::NewRequest => "New PPE Request (Safety + Requestor)",
            Self::StoremanIssuance => "Storeman Issuance",
            Self::Acknowledge => "Requestor Acknowledgement",
        }
    }
}

impl FromStr for View {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "home" => Ok(Self::Home),
            "new" => Ok(Self::NewRequest),
            "storeman" => Ok(Self::StoremanIssuance),
            "ack" => Ok(Self::Acknowledge),
            _ => Err(AppError::Validation(format!("unknown view '{value}'"))),
        }
    }
}
