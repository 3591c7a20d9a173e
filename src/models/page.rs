use serde::{Deserialize, Serialize};

/// Data assembled by the server-side loader for the demo page
///
/// Built only from two successful upstream responses; the view never sees a
/// partial record. `favorite_color` comes from the token-authenticated
/// endpoint, `favorite_animal` and `email` from the cookie-forwarding one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub favorite_color: String,
    pub favorite_animal: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_format() {
        let data = PageData {
            favorite_color: "green".to_string(),
            favorite_animal: "cat".to_string(),
            email: "a@b.c".to_string(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["favoriteColor"], "green");
        assert_eq!(json["favoriteAnimal"], "cat");
        assert_eq!(json["email"], "a@b.c");
    }
}
