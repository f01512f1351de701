use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::{FlashQuery, not_blank, redirect_with_message};
use crate::entities::categories;
use askama::Template;
use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use validator::Validate;

#[derive(Template)]
#[template(path = "categories.html")]
struct CategoriesTemplate {
    categories: Vec<categories::Model>,
    form: CategoryForm,
    name_error: Option<&'static str>,
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(custom(function = not_blank))]
    pub name: String,
}

/// Category list plus the add-category form.
pub async fn list_categories(
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, AppError> {
    let template = CategoriesTemplate {
        categories: state.categories.list_all().await?,
        form: CategoryForm::default(),
        name_error: None,
        message: flash.message,
    };
    Ok(Html(template.render()?))
}

pub async fn add_category(
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, AppError> {
    if form.validate().is_err() {
        let template = CategoriesTemplate {
            categories: state.categories.list_all().await?,
            name_error: Some("Name is required"),
            message: None,
            form,
        };
        return Ok(Html(template.render()?).into_response());
    }

    let category = categories::ActiveModel {
        name: Set(form.name),
        ..Default::default()
    };
    state.categories.save(category).await?;

    Ok(redirect_with_message("/categories", "Category added!").into_response())
}
