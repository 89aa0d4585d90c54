use std::fmt;

/// Scalar value carried by a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(text) => write!(f, "{text}"),
            QueryValue::Integer(integer) => write!(f, "{integer}"),
            QueryValue::Float(float) => write!(f, "{float}"),
            QueryValue::Bool(boolean) => write!(f, "{boolean}"),
        }
    }
}

/// Ordered bag of query parameters. Absent optional values never produce an
/// entry, and encoding is deterministic in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, QueryValue)] {
        &self.pairs
    }

    pub fn text(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs
            .push((key.to_string(), QueryValue::Text(value.to_string())));
        self
    }

    pub fn integer(mut self, key: &str, value: u64) -> Self {
        self.pairs
            .push((key.to_string(), QueryValue::Integer(value)));
        self
    }

    pub fn float(mut self, key: &str, value: f64) -> Self {
        self.pairs.push((key.to_string(), QueryValue::Float(value)));
        self
    }

    pub fn boolean(mut self, key: &str, value: bool) -> Self {
        self.pairs.push((key.to_string(), QueryValue::Bool(value)));
        self
    }

    pub fn maybe_text(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.text(key, value),
            None => self,
        }
    }

    pub fn maybe_integer(self, key: &str, value: Option<u64>) -> Self {
        match value {
            Some(value) => self.integer(key, value),
            None => self,
        }
    }

    pub fn maybe_bool(self, key: &str, value: Option<bool>) -> Self {
        match value {
            Some(value) => self.boolean(key, value),
            None => self,
        }
    }

    /// Renders the bag as a percent-encoded query string, including the
    /// leading `?`. Returns an empty string when there is nothing to encode.
    pub fn encode(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }

        let mut parts = Vec::with_capacity(self.pairs.len());
        for (key, value) in self.pairs.iter() {
            let value = value.to_string();
            parts.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value)
            ));
        }
        format!("?{}", parts.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        assert_eq!(Query::new().encode(), "");
    }

    #[test]
    fn test_encode_scalars() {
        let query = Query::new()
            .text("status", "PENDING")
            .integer("page", 2)
            .integer("limit", 20)
            .boolean("archived", false);
        assert_eq!(query.encode(), "?status=PENDING&page=2&limit=20&archived=false");
    }

    #[test]
    fn test_absent_values_are_omitted() {
        let query = Query::new()
            .maybe_text("status", None::<String>)
            .maybe_integer("page", None)
            .maybe_text("search", Some("agnes"));
        assert_eq!(query.pairs().len(), 1);
        assert_eq!(query.encode(), "?search=agnes");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let build = || {
            Query::new()
                .text("startDate", "2024-01-01")
                .text("endDate", "2024-12-31")
                .integer("limit", 10)
        };
        assert_eq!(build().encode(), build().encode());
        assert_eq!(
            build().encode(),
            "?startDate=2024-01-01&endDate=2024-12-31&limit=10"
        );
    }

    #[test]
    fn test_encode_escapes_values() {
        let query = Query::new().text("search", "loan officer & co");
        assert_eq!(query.encode(), "?search=loan%20officer%20%26%20co");
    }
}
