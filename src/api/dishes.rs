//! Menu endpoints: dishes, categories and add-ons.

use super::paths;
use crate::errors::ClientError;
use crate::http::{ApiClient, ApiRequest, FormField};
use crate::models::{
    Addon, Category, CategoryId, CreateDishRequest, Dish, DishId, DishImage, ReorderDishesRequest,
    UpdateDishPriceRequest,
};
use crate::session::TokenStore;

fn validate_price(price: f64) -> Result<(), ClientError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ClientError::Validation(
            "Price must be a positive amount".to_string(),
        ));
    }
    Ok(())
}

fn image_field(image: &DishImage) -> FormField {
    FormField::File {
        name: "image".to_string(),
        file_name: image.file_name.clone(),
        content_type: image.content_type.clone(),
        bytes: image.bytes.clone(),
    }
}

fn text(name: &str, value: impl ToString) -> FormField {
    FormField::Text {
        name: name.to_string(),
        value: value.to_string(),
    }
}

impl<S: TokenStore> ApiClient<S> {
    /// GET /api/dishes/ - List all dishes.
    pub async fn list_dishes(&self) -> Result<Vec<Dish>, ClientError> {
        self.send(&ApiRequest::get(paths::DISHES)).await?.json()
    }

    /// POST /api/dishes/ - Create a dish, optionally with its image.
    #[tracing::instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_dish(&self, request: &CreateDishRequest) -> Result<Dish, ClientError> {
        if request.name.trim().is_empty() {
            return Err(ClientError::Validation("Dish name is required".to_string()));
        }
        validate_price(request.price)?;

        let mut fields = vec![
            text("name", request.name.trim()),
            text("price", request.price),
            text("category", request.category),
            text("meal_type", request.meal_type.as_str()),
        ];
        if let Some(secondary) = request
            .secondary_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            fields.push(text("secondary_name", secondary.trim()));
        }
        if let Some(image) = &request.image {
            fields.push(image_field(image));
        }

        self.send(&ApiRequest::post(paths::DISHES).multipart(fields))
            .await?
            .json()
    }

    /// PATCH /api/dishes/:id/ - Change the price of a dish.
    #[tracing::instrument(skip(self))]
    pub async fn update_dish_price(&self, id: DishId, price: f64) -> Result<Dish, ClientError> {
        validate_price(price)?;

        let request = ApiRequest::patch(paths::item(paths::DISHES, id))
            .json(&UpdateDishPriceRequest { price })?;
        self.send(&request).await?.json()
    }

    /// PATCH /api/dishes/:id/ - Replace the image of a dish.
    #[tracing::instrument(skip(self, image), fields(file_name = %image.file_name))]
    pub async fn update_dish_image(&self, id: DishId, image: &DishImage) -> Result<Dish, ClientError> {
        if image.bytes.is_empty() {
            return Err(ClientError::Validation("Image file is empty".to_string()));
        }

        let request =
            ApiRequest::patch(paths::item(paths::DISHES, id)).multipart(vec![image_field(image)]);
        self.send(&request).await?.json()
    }

    /// POST /api/dishes/reorder/ - Persist the dish order of one category.
    #[tracing::instrument(skip(self, dish_ids))]
    pub async fn reorder_dishes(
        &self,
        category_id: CategoryId,
        dish_ids: Vec<DishId>,
    ) -> Result<(), ClientError> {
        if dish_ids.is_empty() {
            return Err(ClientError::Validation("Nothing to reorder".to_string()));
        }

        let request = ApiRequest::post(paths::DISH_REORDER).json(&ReorderDishesRequest {
            category_id,
            dish_ids,
        })?;
        self.send(&request).await?.empty()
    }

    /// GET /api/categories/ - List menu categories.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.send(&ApiRequest::get(paths::CATEGORIES)).await?.json()
    }

    /// GET /api/addons/ - List add-ons.
    pub async fn list_addons(&self) -> Result<Vec<Addon>, ClientError> {
        self.send(&ApiRequest::get(paths::ADDONS)).await?.json()
    }
}
