use serde::{Deserialize, Serialize};

/// A transfer of `amount` from one address to another.
///
/// `from == None` marks a reward credit with no debited source. Nothing checks
/// the sender's balance, so an address can go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    // Nullable, but the key itself must be present in the payload.
    #[serde(deserialize_with = "Option::deserialize")]
    pub from: Option<String>,
    pub to: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        Self {
            from: Some(from.into()),
            to: to.into(),
            amount,
        }
    }

    /// Credit-only transaction paid to whoever mined the block.
    pub fn reward(to: impl Into<String>, amount: f64) -> Self {
        Self {
            from: None,
            to: to.into(),
            amount,
        }
    }

    /// Signed effect of this transaction on `address`.
    pub fn delta_for(&self, address: &str) -> f64 {
        let mut delta = 0.0;
        if self.from.as_deref() == Some(address) {
            delta -= self.amount;
        }
        if self.to == address {
            delta += self.amount;
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn parses_full_record() {
        let tx: Transaction =
            serde_json::from_str(r#"{"from":"Alice","to":"Bob","amount":10}"#).unwrap();
        assert_eq!(tx, Transaction::new("Alice", "Bob", 10.0));
    }

    #[test]
    fn null_sender_is_a_reward() {
        let tx: Transaction =
            serde_json::from_str(r#"{"from":null,"to":"node_5000","amount":10}"#).unwrap();
        assert_eq!(tx, Transaction::reward("node_5000", 10.0));
    }

    #[test]
    fn rejects_missing_fields() {
        for body in [
            r#"{"to":"Bob","amount":1}"#,
            r#"{"from":"Alice","amount":1}"#,
            r#"{"from":"Alice","to":"Bob"}"#,
            r#"{"from":"Alice","to":"Bob","amount":"ten"}"#,
        ] {
            assert!(
                serde_json::from_str::<Transaction>(body).is_err(),
                "accepted {body}"
            );
        }
    }

    #[test]
    fn self_transfer_nets_to_zero() {
        let tx = Transaction::new("Alice", "Alice", 5.0);
        assert_eq!(tx.delta_for("Alice"), 0.0);
        assert_eq!(tx.delta_for("Bob"), 0.0);
    }

    #[test]
    fn wire_field_order_is_stable() {
        let json = serde_json::to_string(&Transaction::reward("R", 10.0)).unwrap();
        assert_eq!(json, r#"{"from":null,"to":"R","amount":10.0}"#);
    }
}
