use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;
use actix_web_flash_messages::Level;

use crate::submission::SubmissionStatus;
use crate::submission::WaitlistForm;
use crate::submission::PENDING_LABEL;

/// `GET /`
///
/// The landing page with a fresh (idle) waitlist form. A successful
/// `POST /waitlist` redirects here with its message in a flash cookie.
pub async fn home(flash_messages: IncomingFlashMessages) -> HttpResponse {
    let mut notices = String::new();
    for msg in flash_messages.iter() {
        let class = match msg.level() {
            Level::Error | Level::Warning => "notice notice-error",
            _ => "notice notice-success",
        };
        notices.push_str(&format!(
            "<p class=\"{class}\">{}</p>\n",
            htmlescape::encode_minimal(msg.content())
        ));
    }

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(landing_page(&WaitlistForm::new(), &notices))
}

/// `onsubmit` for the waitlist form: the browser side of the Pending state.
/// Swallows a second submit while the first request is out, and locks the
/// input and button the way `landing_page` renders a pending form. The input
/// is made read-only rather than disabled: disabled controls are left out of
/// the form body.
pub fn pending_handler() -> String {
    format!(
        "if (this.dataset.pending) return false; \
         this.dataset.pending = '1'; \
         this.email.readOnly = true; \
         var button = this.querySelector('button'); \
         button.disabled = true; \
         button.textContent = '{PENDING_LABEL}';"
    )
}

/// Render the whole page around `form`. `notices` is already-escaped html
/// placed under the form (flash messages).
pub fn landing_page(
    form: &WaitlistForm,
    notices: &str,
) -> String {
    // user input, inside a double-quoted attribute
    let email = htmlescape::encode_minimal(form.email());
    let disabled = match form.is_disabled() {
        true => " disabled",
        false => "",
    };
    let label = form.button_label();
    let onsubmit = pending_handler();
    let status_msg = match (form.status(), form.message()) {
        (SubmissionStatus::Failed(_), Some(msg)) => {
            format!("<p class=\"notice notice-error\">{msg}</p>")
        }
        (_, Some(msg)) => format!("<p class=\"notice notice-success\">{msg}</p>"),
        (_, None) => String::new(),
    };

    format!(
        r##"<!doctype html>
<html lang="en">
  <head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Product videos, instantly</title>
  </head>
  <body>
    <section id="hero">
      <h1>Turn a one-liner into a cinematic product video</h1>
      <p>Describe your product in a sentence. Get a ready-to-ship 12-second video.</p>
      <a href="#access">Join the waitlist</a>
    </section>

    <section id="access">
      <h2>Make your product <em>instantly</em> understandable</h2>
      <p>
        Join the waitlist to be among the first to transform your product story
        into cinematic 12-second videos.
      </p>
      <!-- `POST`, so the email does not end up in the url -->
      <form action="/waitlist" method="post" onsubmit="{onsubmit}">
        <input type="email" name="email" placeholder="your@email.com"
          value="{email}" required{disabled} />
        <button type="submit"{disabled}>{label}</button>
      </form>
      {status_msg}
      {notices}
    </section>
  </body>
</html>
"##
    )
}
