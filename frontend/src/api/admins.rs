use super::{
    client::ApiClient,
    types::{AdminRecord, ApiError, CreateAdminRequest, RemoveAdminRequest, UpdateAdminRequest},
};

const LIST_ADMINS_PATH: &str = "/admin-users";
const ADD_ADMIN_PATH: &str = "/add-admin";
const REMOVE_ADMIN_PATH: &str = "/remove-admin";
const UPDATE_ADMIN_PATH: &str = "/update-admin";

impl ApiClient {
    pub async fn list_admins(&self) -> Result<Vec<AdminRecord>, ApiError> {
        self.get_json(LIST_ADMINS_PATH).await
    }

    pub async fn add_admin(&self, request: &CreateAdminRequest) -> Result<(), ApiError> {
        self.post_json(ADD_ADMIN_PATH, request).await
    }

    pub async fn remove_admin(&self, request: &RemoveAdminRequest) -> Result<(), ApiError> {
        self.post_json(REMOVE_ADMIN_PATH, request).await
    }

    pub async fn update_admin(&self, request: &UpdateAdminRequest) -> Result<(), ApiError> {
        self.post_json(UPDATE_ADMIN_PATH, request).await
    }
}
