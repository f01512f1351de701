use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::{FlashQuery, not_blank, redirect_with_message};
use crate::entities::{categories, flashcards};
use askama::Template;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use tracing::warn;
use validator::Validate;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    flashcards: Vec<flashcards::Model>,
    categories: Vec<categories::Model>,
    message: Option<String>,
}

#[derive(Template)]
#[template(path = "add-card.html")]
struct AddCardTemplate {
    form: FlashcardForm,
    question_error: Option<&'static str>,
    answer_error: Option<&'static str>,
    categories: Vec<categories::Model>,
    available_images: Vec<String>,
    message: Option<String>,
}

#[derive(Template)]
#[template(path = "study.html")]
struct StudyTemplate {
    flashcards: Vec<flashcards::Model>,
    category_name: Option<String>,
}

/// Submitted add-flashcard fields, gathered from the multipart body.
#[derive(Debug, Default, Validate)]
pub struct FlashcardForm {
    #[validate(custom(function = not_blank))]
    pub question: String,
    #[validate(custom(function = not_blank))]
    pub answer: String,
    pub category_id: Option<i32>,
    pub selected_image: Option<String>,
}

/// Homepage: all flashcards and all categories.
pub async fn index(
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        flashcards: state.flashcards.list_all().await?,
        categories: state.categories.list_all().await?,
        message: flash.message,
    };
    Ok(Html(template.render()?))
}

/// Add-flashcard form with categories and the images already on disk.
pub async fn show_add_form(
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, AppError> {
    let template = AddCardTemplate {
        form: FlashcardForm::default(),
        question_error: None,
        answer_error: None,
        categories: state.categories.list_all().await?,
        available_images: state.flashcards.available_images(),
        message: flash.message,
    };
    Ok(Html(template.render()?))
}

/// Creates a flashcard from the multipart form.
///
/// Image priority: uploaded file, then a selected existing image, then a
/// random pick from the images directory. Validation failures re-render the
/// form; an upload failure redirects back with a notice.
pub async fn add_flashcard(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = FlashcardForm::default();
    let mut upload: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "question" => form.question = field.text().await.unwrap_or_default(),
            "answer" => form.answer = field.text().await.unwrap_or_default(),
            "categoryId" => {
                let text = field.text().await.unwrap_or_default();
                form.category_id = text.parse().ok();
            }
            "selectedImage" => {
                let text = field.text().await.unwrap_or_default();
                if !text.is_empty() {
                    form.selected_image = Some(text);
                }
            }
            "imageFile" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !filename.is_empty() && !data.is_empty() {
                    upload = Some((filename, data));
                }
            }
            _ => {}
        }
    }

    if let Err(errors) = form.validate() {
        let fields = errors.field_errors();
        let template = AddCardTemplate {
            question_error: fields
                .contains_key("question")
                .then_some("Question is required"),
            answer_error: fields.contains_key("answer").then_some("Answer is required"),
            categories: state.categories.list_all().await?,
            available_images: state.flashcards.available_images(),
            message: None,
            form,
        };
        return Ok(Html(template.render()?).into_response());
    }

    let image_url = if let Some((filename, data)) = upload {
        match store_upload(&state.config.upload_dir, &filename, &data).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Image upload failed: {}", e);
                let notice = format!("Error uploading image: {e}");
                return Ok(redirect_with_message("/add", &notice).into_response());
            }
        }
    } else if form.selected_image.is_some() {
        form.selected_image.clone()
    } else {
        state.flashcards.random_image()
    };

    let card = flashcards::ActiveModel {
        question: Set(form.question),
        answer: Set(form.answer),
        image_url: Set(image_url),
        category_id: Set(form.category_id),
        ..Default::default()
    };
    state.flashcards.save(card).await?;

    Ok(redirect_with_message("/", "Flashcard added!").into_response())
}

/// Study view over all flashcards; nothing to study redirects to the form.
pub async fn study(State(state): State<AppState>) -> Result<Response, AppError> {
    let flashcards = state.flashcards.list_all().await?;
    if flashcards.is_empty() {
        return Ok(Redirect::to("/add").into_response());
    }

    let template = StudyTemplate {
        flashcards,
        category_name: None,
    };
    Ok(Html(template.render()?).into_response())
}

/// Study view for one category; an unknown id falls back to `/study`.
pub async fn study_by_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let Some(category) = state.categories.get_by_id(id).await? else {
        return Ok(Redirect::to("/study").into_response());
    };

    let template = StudyTemplate {
        flashcards: state.flashcards.list_by_category(&category).await?,
        category_name: Some(category.name),
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn delete_flashcard(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    state.flashcards.delete_by_id(id).await?;
    Ok(redirect_with_message("/", "Flashcard deleted!").into_response())
}

/// Persists a random image on every flashcard still lacking one.
pub async fn randomize_images(State(state): State<AppState>) -> Result<Response, AppError> {
    let updated = state.flashcards.randomize_missing_images().await?;
    let notice = format!("{updated} flashcards were given random images!");
    Ok(redirect_with_message("/", &notice).into_response())
}

/// Writes the uploaded bytes under `<millis><original-extension>` and returns
/// the web path to store on the flashcard.
async fn store_upload(
    dir: &std::path::Path,
    original_name: &str,
    data: &[u8],
) -> std::io::Result<String> {
    tokio::fs::create_dir_all(dir).await?;

    let extension = original_name
        .rfind('.')
        .map(|dot| &original_name[dot..])
        .unwrap_or("");
    let filename = format!("{}{}", Utc::now().timestamp_millis(), extension);

    tokio::fs::write(dir.join(&filename), data).await?;
    Ok(format!("/images/{filename}"))
}
