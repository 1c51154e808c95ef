use crate::helpers::spawn_app;

#[tokio::test]
async fn landing_page_has_waitlist_form() {
    let app = spawn_app().await;

    let resp = app.get_home().await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "text/html; charset=utf-8"
    );

    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"<section id="access">"#));
    assert!(html.contains(r#"<form action="/waitlist" method="post" onsubmit=""#));
    assert!(html.contains(r#"type="email" name="email""#));
    assert!(html.contains(">Request access</button>"));
    assert!(!html.contains("Thank you!"));
}

#[tokio::test]
async fn landing_page_locks_form_while_submitting() {
    let app = spawn_app().await;

    let html = app.get_home_html().await;
    let form = html
        .split(r#"<form action="/waitlist" method="post""#)
        .nth(1)
        .and_then(|rest| rest.split('>').next())
        .unwrap();
    assert!(form.contains("onsubmit="));
    assert!(form.contains("if (this.dataset.pending) return false;"));
    assert!(form.contains("button.disabled = true;"));
    assert!(form.contains("'Submitting...'"));
}
