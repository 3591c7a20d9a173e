//! Pure HTML rendering for the demo page.
//!
//! No state and no side effects: markup in, markup out. The header email
//! comes from the live session while the body email comes from the loader's
//! profile endpoint; the two are rendered independently and are not assumed
//! to be the same address.

use crate::models::{PageData, Session};

/// Render the full demo page document
pub fn render_demo_page(session: &Session, data: &PageData) -> String {
    let session_email = escape_html(&session.email);
    let sign_out_path = escape_html(&session.sign_out_path);
    let color = escape_html(&data.favorite_color);
    let animal = escape_html(&data.favorite_animal);
    let email = escape_html(&data.email);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Example: SSR + data fetching</title>
</head>
<body>
  <header>
    <span>Signed in as {session_email}</span>
    <form method="post" action="{sign_out_path}">
      <button type="submit">Sign out</button>
    </form>
  </header>
  <main>
    <h3>Example: SSR + data fetching</h3>
    <p>
      This page requires authentication. It will do a server-side redirect
      (307) to the login page if the auth cookies are not set.
    </p>
    <p>Your favorite color is: {color}</p>
    <p>
      Your favorite animal is {animal}. Please send lots of photos
      of {animal} to {email}.
    </p>
  </main>
  <nav>
    <a href="/">Home</a>
    <a href="/demo">SSR demo</a>
    <a href="/auth/login">Login</a>
  </nav>
</body>
</html>
"#
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SIGN_OUT_PATH;

    fn session() -> Session {
        Session {
            email: "header@example.com".to_string(),
            sign_out_path: SIGN_OUT_PATH.to_string(),
        }
    }

    fn data() -> PageData {
        PageData {
            favorite_color: "green".to_string(),
            favorite_animal: "capuchin".to_string(),
            email: "body@example.com".to_string(),
        }
    }

    #[test]
    fn test_renders_loader_data() {
        let html = render_demo_page(&session(), &data());
        assert!(html.contains("Your favorite color is: green"));
        assert!(html.contains("Your favorite animal is capuchin."));
        assert!(html.contains("photos\n      of capuchin to body@example.com"));
    }

    #[test]
    fn test_header_uses_session_email_not_loader_email() {
        let html = render_demo_page(&session(), &data());
        assert!(html.contains("Signed in as header@example.com"));
        assert!(html.contains("body@example.com"));
    }

    #[test]
    fn test_sign_out_form_targets_session_capability() {
        let html = render_demo_page(&session(), &data());
        assert!(html.contains(r#"<form method="post" action="/auth/sign-out">"#));
    }

    #[test]
    fn test_escapes_interpolated_values() {
        let data = PageData {
            favorite_color: "<script>alert(1)</script>".to_string(),
            favorite_animal: "cat & dog".to_string(),
            email: "a@b.c".to_string(),
        };
        let html = render_demo_page(&session(), &data);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("cat &amp; dog"));
    }
}
