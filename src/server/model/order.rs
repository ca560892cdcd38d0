use serde::Deserialize;
use serde_json::Value;

const ROOM_NUMBER_FALLBACK: &str = "Not provided";

/// Order body as sent by the client, nothing checked yet
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrderRequest {
    #[serde(default)]
    pub items: Option<Value>,
    #[serde(default)]
    pub room_number: Option<Value>,
    #[serde(default, rename = "userEmail")]
    pub user_email: Option<Value>,
}

/// A validated order: at least one item and a non-empty customer email
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderSubmission {
    pub items: Vec<String>,
    pub room_number: Option<String>,
    pub user_email: String,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct InvalidOrder;

impl OrderRequest {
    /// Fold url-encoded pairs into a request. `items`, `items[]` and `items[N]` all add an item.
    pub fn from_form_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut indexed: Vec<(usize, String)> = Vec::new();
        let mut plain: Vec<String> = Vec::new();
        let mut request = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "items" | "items[]" => plain.push(value),
                "room_number" => request.room_number = Some(Value::String(value)),
                "userEmail" => request.user_email = Some(Value::String(value)),
                key => {
                    if let Some(idx) = key
                        .strip_prefix("items[")
                        .and_then(|rest| rest.strip_suffix(']'))
                        .and_then(|idx| idx.parse::<usize>().ok())
                    {
                        indexed.push((idx, value));
                    }
                }
            }
        }

        // stable sort keeps duplicate indices in arrival order
        indexed.sort_by_key(|(idx, _)| *idx);
        let items = indexed
            .into_iter()
            .map(|(_, v)| v)
            .chain(plain)
            .map(Value::String)
            .collect::<Vec<_>>();
        if !items.is_empty() {
            request.items = Some(Value::Array(items));
        }
        request
    }
}

impl TryFrom<OrderRequest> for OrderSubmission {
    type Error = InvalidOrder;

    fn try_from(req: OrderRequest) -> Result<Self, Self::Error> {
        let items = match req.items {
            Some(Value::Array(values)) if !values.is_empty() => values
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s),
                    Value::Number(n) => Ok(n.to_string()),
                    Value::Bool(b) => Ok(b.to_string()),
                    _ => Err(InvalidOrder),
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(InvalidOrder),
        };
        let user_email = match req.user_email {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => return Err(InvalidOrder),
        };
        let room_number = match req.room_number {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            // 0 and false count as absent, like any other falsy value
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Some(Value::Bool(true)) => Some(true.to_string()),
            _ => None,
        };

        Ok(Self {
            items,
            room_number,
            user_email,
        })
    }
}

impl OrderSubmission {
    pub fn room_number_or_fallback(&self) -> &str {
        self.room_number.as_deref().unwrap_or(ROOM_NUMBER_FALLBACK)
    }
}
