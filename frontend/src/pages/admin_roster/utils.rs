use crate::api::{AdminRecord, ApiError, CreateAdminRequest, RemoveAdminRequest, UpdateAdminRequest};

pub const MISSING_ADD_FIELDS: &str =
    "Please enter all required fields (email, first name, and last name)";
pub const MISSING_REMOVE_EMAIL: &str = "Please enter the email of the admin to remove";
pub const MISSING_UPDATE_NAMES: &str = "First name and last name are required";
pub const PHOTO_PLACEHOLDER: &str = "https://via.placeholder.com/50";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RosterTab {
    #[default]
    Admins,
    Employees,
}

impl RosterTab {
    pub const ALL: [RosterTab; 2] = [RosterTab::Admins, RosterTab::Employees];

    pub fn label(self) -> &'static str {
        match self {
            RosterTab::Admins => "Admins",
            RosterTab::Employees => "Employees",
        }
    }
}

fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddAdminFormState {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: String,
}

impl AddAdminFormState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<CreateAdminRequest, ApiError> {
        match (
            required(&self.email),
            required(&self.first_name),
            required(&self.last_name),
        ) {
            (Some(email), Some(first_name), Some(last_name)) => Ok(CreateAdminRequest {
                email,
                first_name,
                last_name,
                photo_url: self.photo_url.trim().to_string(),
            }),
            _ => Err(ApiError::validation(MISSING_ADD_FIELDS)),
        }
    }
}

/// Values collected by the edit dialog for one admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAdminDraft {
    pub uid: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: String,
}

impl UpdateAdminDraft {
    pub fn from_record(record: &AdminRecord) -> Self {
        Self {
            uid: record.uid.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            photo_url: record.photo().unwrap_or_default().to_string(),
        }
    }

    pub fn validate(&self) -> Result<UpdateAdminRequest, ApiError> {
        match (required(&self.first_name), required(&self.last_name)) {
            (Some(first_name), Some(last_name)) => Ok(UpdateAdminRequest {
                uid: self.uid.clone(),
                first_name,
                last_name,
                photo_url: self.photo_url.trim().to_string(),
            }),
            _ => Err(ApiError::validation(MISSING_UPDATE_NAMES)),
        }
    }
}

pub fn validate_removal(email: &str) -> Result<RemoveAdminRequest, ApiError> {
    required(email)
        .map(|email| RemoveAdminRequest { email })
        .ok_or_else(|| ApiError::validation(MISSING_REMOVE_EMAIL))
}

pub fn photo_or_placeholder(record: &AdminRecord) -> String {
    record.photo().unwrap_or(PHOTO_PLACEHOLDER).to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MessageState {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }
}
