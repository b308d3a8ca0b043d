use crate::api::{
    AdminRecord, ApiClient, ApiError, CreateAdminRequest, RemoveAdminRequest, UpdateAdminRequest,
};
use std::rc::Rc;

#[derive(Clone)]
pub struct AdminRosterRepository {
    client: Rc<ApiClient>,
}

impl AdminRosterRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_admins(&self) -> Result<Vec<AdminRecord>, ApiError> {
        self.client.list_admins().await
    }

    pub async fn add_admin(&self, payload: CreateAdminRequest) -> Result<(), ApiError> {
        self.client.add_admin(&payload).await
    }

    pub async fn remove_admin(&self, payload: RemoveAdminRequest) -> Result<(), ApiError> {
        self.client.remove_admin(&payload).await
    }

    pub async fn update_admin(&self, payload: UpdateAdminRequest) -> Result<(), ApiError> {
        self.client.update_admin(&payload).await
    }
}
