//! Transaction query records

use super::constants::SUCCESS_CODE;
use super::lenient;
use serde::{Deserialize, Serialize};

/// One transaction as returned under `data.*` by `/trade/v1/query`
///
/// Every field is a string on the wire. Absent, `null` or mistyped fields
/// decode as empty without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRecord {
    /// Cancellation or refund indicator
    #[serde(deserialize_with = "lenient::string")]
    pub cancel: String,
    /// Card number
    #[serde(deserialize_with = "lenient::string")]
    pub cardcd: String,
    #[serde(deserialize_with = "lenient::string")]
    pub cardtp: String,
    /// Wallet/channel transaction number
    #[serde(deserialize_with = "lenient::string")]
    pub chnlsn: String,
    /// Additional transaction number added to the order
    #[serde(deserialize_with = "lenient::string")]
    pub chnlsn2: String,
    #[serde(deserialize_with = "lenient::string")]
    pub clisn: String,
    /// Payment status message
    #[serde(deserialize_with = "lenient::string")]
    pub errmsg: String,
    /// Product details
    #[serde(deserialize_with = "lenient::string")]
    pub goods_detail: String,
    /// Product description
    #[serde(deserialize_with = "lenient::string")]
    pub goods_info: String,
    /// Product name
    #[serde(deserialize_with = "lenient::string")]
    pub goods_name: String,
    /// Order type (payment / refund)
    #[serde(deserialize_with = "lenient::string")]
    pub order_type: String,
    /// Merchant order number
    #[serde(deserialize_with = "lenient::string")]
    pub out_trade_no: String,
    /// Payment type code
    #[serde(deserialize_with = "lenient::string")]
    pub pay_type: String,
    /// Payment time of the transaction
    #[serde(deserialize_with = "lenient::string")]
    pub paydtm: String,
    /// Payment status
    #[serde(deserialize_with = "lenient::string")]
    pub respcd: String,
    /// System transaction time
    #[serde(deserialize_with = "lenient::string")]
    pub sysdtm: String,
    /// QFPay transaction number
    #[serde(deserialize_with = "lenient::string")]
    pub syssn: String,
    /// Transaction amount in minor units
    #[serde(deserialize_with = "lenient::string")]
    pub txamt: String,
    /// Transaction currency
    #[serde(deserialize_with = "lenient::string")]
    pub txcurrcd: String,
    /// Request transaction time
    #[serde(deserialize_with = "lenient::string")]
    pub txdtm: String,
    /// Unique transaction device ID
    #[serde(deserialize_with = "lenient::string")]
    pub udid: String,
    /// User ID
    #[serde(deserialize_with = "lenient::string")]
    pub userid: String,
}

impl QueryRecord {
    /// Whether the transaction was paid
    pub fn paid(&self) -> bool {
        self.respcd == SUCCESS_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paid_record() {
        let record: QueryRecord = serde_json::from_value(json!({
            "out_trade_no": "T1",
            "respcd": "0000",
            "txamt": "100",
        }))
        .unwrap();

        assert!(record.paid());
        assert_eq!(record.out_trade_no, "T1");
        assert_eq!(record.txamt, "100");
        assert!(record.syssn.is_empty());
    }

    #[test]
    fn test_null_fields_keep_the_rest() {
        let record: QueryRecord = serde_json::from_value(json!({
            "out_trade_no": "T1",
            "respcd": "0000",
            "cardcd": null,
            "chnlsn2": null,
            "txamt": 100,
        }))
        .unwrap();

        assert!(record.paid());
        assert_eq!(record.out_trade_no, "T1");
        assert!(record.cardcd.is_empty());
        assert!(record.chnlsn2.is_empty());
        assert!(record.txamt.is_empty());
    }

    #[test]
    fn test_pending_record() {
        let record = QueryRecord {
            respcd: "1143".to_string(),
            ..Default::default()
        };
        assert!(!record.paid());
        assert!(!QueryRecord::default().paid());
    }
}
