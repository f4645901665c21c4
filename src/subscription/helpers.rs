pub fn prepare_html_template(entries: &[(&str, &str)], template_name: &str) -> String {
    let mut ctx = tera::Context::new();
    for (key, value) in entries.iter().copied() {
        ctx.insert(key, value);
    }
    let tera = tera::Tera::new("views/**/*").expect("Failed to initialize Tera templates");
    tera.render(template_name, &ctx)
        .expect("Failed rendering email template")
}

pub fn get_email_html(confirm_link: &str, unsubscribe_link: &str) -> String {
    prepare_html_template(
        &[
            ("confirm_link", confirm_link),
            ("unsubscribe_link", unsubscribe_link),
        ],
        "confirm_subscription_letter.html",
    )
}

pub fn get_email_text(confirm_link: &str, unsubscribe_link: &str) -> String {
    format!(
        "
        Confirm your subscription

        Thank you for subscribing to our updates! Please follow the link below to confirm your subscription:

        {confirm_link}

        If you didn't request this subscription, you can safely ignore this email.

        To stop receiving updates at any time, use this link:

        {unsubscribe_link}
    "
    )
}
