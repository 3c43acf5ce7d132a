//! Worker, material and expense endpoints.

use super::paths;
use crate::errors::ClientError;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{
    DateRange, Expense, ExpenseId, ExpenseRequest, Material, MaterialId, MaterialRequest, Worker,
    WorkerId, WorkerRequest,
};
use crate::session::TokenStore;

fn require_name(name: &str, what: &str) -> Result<(), ClientError> {
    if name.trim().is_empty() {
        return Err(ClientError::Validation(format!("{} name is required", what)));
    }
    Ok(())
}

impl<S: TokenStore> ApiClient<S> {
    // ==================== WORKERS ====================

    /// GET /api/workers/ - List workers.
    pub async fn list_workers(&self) -> Result<Vec<Worker>, ClientError> {
        self.send(&ApiRequest::get(paths::WORKERS)).await?.json()
    }

    /// POST /api/workers/ - Create a worker.
    pub async fn create_worker(&self, request: &WorkerRequest) -> Result<Worker, ClientError> {
        require_name(&request.name, "Worker")?;
        let request = ApiRequest::post(paths::WORKERS).json(request)?;
        self.send(&request).await?.json()
    }

    /// PUT /api/workers/:id/ - Replace a worker.
    pub async fn update_worker(
        &self,
        id: WorkerId,
        request: &WorkerRequest,
    ) -> Result<Worker, ClientError> {
        require_name(&request.name, "Worker")?;
        let request = ApiRequest::put(paths::item(paths::WORKERS, id)).json(request)?;
        self.send(&request).await?.json()
    }

    /// DELETE /api/workers/:id/ - Delete a worker.
    pub async fn delete_worker(&self, id: WorkerId) -> Result<(), ClientError> {
        self.send(&ApiRequest::delete(paths::item(paths::WORKERS, id)))
            .await?
            .empty()
    }

    // ==================== MATERIALS ====================

    /// GET /api/materials/ - List materials.
    pub async fn list_materials(&self) -> Result<Vec<Material>, ClientError> {
        self.send(&ApiRequest::get(paths::MATERIALS)).await?.json()
    }

    /// POST /api/materials/ - Create a material.
    pub async fn create_material(&self, request: &MaterialRequest) -> Result<Material, ClientError> {
        require_name(&request.name, "Material")?;
        let request = ApiRequest::post(paths::MATERIALS).json(request)?;
        self.send(&request).await?.json()
    }

    /// PUT /api/materials/:id/ - Replace a material.
    pub async fn update_material(
        &self,
        id: MaterialId,
        request: &MaterialRequest,
    ) -> Result<Material, ClientError> {
        require_name(&request.name, "Material")?;
        let request = ApiRequest::put(paths::item(paths::MATERIALS, id)).json(request)?;
        self.send(&request).await?.json()
    }

    /// DELETE /api/materials/:id/ - Delete a material.
    pub async fn delete_material(&self, id: MaterialId) -> Result<(), ClientError> {
        self.send(&ApiRequest::delete(paths::item(paths::MATERIALS, id)))
            .await?
            .empty()
    }

    // ==================== EXPENSES ====================

    /// GET /api/expenses/ - Expenses recorded inside a UTC range.
    pub async fn list_expenses(&self, range: &DateRange) -> Result<Vec<Expense>, ClientError> {
        let request = ApiRequest::get(paths::EXPENSES).query_pairs(range.query_pairs());
        self.send(&request).await?.json()
    }

    /// POST /api/expenses/ - Record an expense.
    #[tracing::instrument(skip(self, request), fields(kind = ?request.kind, amount = request.amount))]
    pub async fn create_expense(&self, request: &ExpenseRequest) -> Result<Expense, ClientError> {
        request.validate().map_err(ClientError::Validation)?;
        let request = ApiRequest::post(paths::EXPENSES).json(request)?;
        self.send(&request).await?.json()
    }

    /// PUT /api/expenses/:id/ - Replace an expense.
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        request: &ExpenseRequest,
    ) -> Result<Expense, ClientError> {
        request.validate().map_err(ClientError::Validation)?;
        let request = ApiRequest::put(paths::item(paths::EXPENSES, id)).json(request)?;
        self.send(&request).await?.json()
    }

    /// DELETE /api/expenses/:id/ - Delete an expense.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<(), ClientError> {
        self.send(&ApiRequest::delete(paths::item(paths::EXPENSES, id)))
            .await?
            .empty()
    }
}
