use actix_web::http::header::ContentType;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;
use serde::Deserialize;

use super::home::landing_page;
use crate::submission::SubmissionStatus;
use crate::submission::WaitlistForm;
use crate::submission::SUCCESS_MESSAGE;
use crate::utils::redirect;
use crate::waitlist_client::WaitlistClient;

#[derive(Deserialize)]
pub struct WaitlistFormData {
    email: String,
}

/// `POST /waitlist`
///
/// Forwards the email to the collection endpoint, one request per post.
///
/// On success, redirect to `/#access` with a flash message (so a reload does
/// not post again, and the input comes back empty). On any failure, render
/// the page straight away with the email still filled in.
///
/// # Request example
///
/// ```sh
///     curl -v --data 'email=john%40foo.com' http://127.0.0.1:8000/waitlist
/// ```
///
/// A body without an `email` field never gets here; the `Form` extractor
/// answers 400 on its own.
#[tracing::instrument(
    name = "Joining the waitlist",
    skip(form, client),
    fields(waitlist_email = %form.email)
)]
pub async fn join_waitlist(
    form: web::Form<WaitlistFormData>,
    client: web::Data<WaitlistClient>,
) -> HttpResponse {
    let mut waitlist_form = WaitlistForm::with_email(form.0.email);

    match waitlist_form.submit(&client).await {
        SubmissionStatus::Success => {
            FlashMessage::info(SUCCESS_MESSAGE).send();
            redirect("/#access")
        }
        status => {
            tracing::info!(?status, "re-rendering waitlist form");
            HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(landing_page(&waitlist_form, ""))
        }
    }
}
