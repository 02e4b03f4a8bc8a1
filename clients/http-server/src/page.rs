/// The submission form, optionally showing a message above the fields
pub fn form_page(message: Option<&str>) -> String {
    let message = message
        .map(|message| format!(r#"<p class="message">{}</p>"#, escape(message)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Certificate Generator</title>
</head>
<body>
    <h1>Download your certificate</h1>
    {message}
    <form action="/generate_certificate" method="post">
        <label for="name">Name</label>
        <input type="text" id="name" name="name" required>
        <label for="email">Email</label>
        <input type="email" id="email" name="email" required>
        <button type="submit">Generate certificate</button>
    </form>
</body>
</html>
"#
    )
}

fn escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}
