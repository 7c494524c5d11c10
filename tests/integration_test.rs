//! End-to-end tests against a mocked QFPay gateway

use mockito::{Matcher, Server};
use qfpay::{
    crypto, ClientConfig, Extraction, PayType, Payload, QfPayClient, QfPayError, QueryRecord,
};
use serde_json::json;
use std::collections::HashMap;

const APP_CODE: &str = "A1B2C3D4E5F60718293A4B5C6D7E8F90";
const KEY: &str = "0F1E2D3C4B5A69788796A5B4C3D2E1F0";

#[tokio::test]
async fn test_pay_then_query() {
    let mut server = Server::new_async().await;

    let payment = server
        .mock("POST", "/trade/v1/payment")
        .match_header("x-qf-appcode", APP_CODE)
        .match_header("x-qf-sign", Matcher::Regex("^[0-9A-F]{32}$".to_string()))
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("pay_type".to_string(), "800201".to_string()),
            Matcher::UrlEncoded("out_trade_no".to_string(), "INT-1".to_string()),
            Matcher::UrlEncoded("txamt".to_string(), "1200".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "respcd": "0000",
                "resperr": "",
                "respmsg": "",
                "qrcode": "weixin://wxpay/bizpayurl?pr=abc",
                "syssn": "20240101000100020000000042",
                "txamt": "1200"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let query = server
        .mock("POST", "/trade/v1/query")
        .match_body(Matcher::UrlEncoded(
            "out_trade_no".to_string(),
            "INT-1".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "respcd": "0000",
                "resperr": "",
                "data": [{
                    "out_trade_no": "INT-1",
                    "syssn": "20240101000100020000000042",
                    "pay_type": "800201",
                    "respcd": "0000",
                    "txamt": "1200",
                    "txcurrcd": "HKD",
                    "errmsg": "success"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = QfPayClient::new(ClientConfig::new(server.url(), APP_CODE, KEY)).unwrap();

    let mut qrcode = String::new();
    let mut syssn = String::new();
    let mut amount: u64 = 0;
    client
        .make_payment(PayType::WechatPayQrCode, "INT-1", "Lunch", 1200, &HashMap::new())
        .unwrap()
        .send_into(
            Extraction::new()
                .scalar(&mut qrcode, "qrcode")
                .scalar(&mut syssn, "syssn")
                // a string on the wire does not fit a number
                .scalar(&mut amount, "txamt"),
        )
        .await
        .unwrap();

    assert_eq!(qrcode, "weixin://wxpay/bizpayurl?pr=abc");
    assert_eq!(syssn, "20240101000100020000000042");
    assert_eq!(amount, 0);

    let records: Vec<QueryRecord> = client.query(&["INT-1"]).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].syssn, syssn);
    assert!(records[0].paid());
    // fields the gateway left out decode as empty
    assert!(records[0].chnlsn.is_empty());

    payment.assert_async().await;
    query.assert_async().await;
}

#[tokio::test]
async fn test_signature_matches_wire_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/trade/v1/payment")
        .with_status(200)
        .with_body(r#"{"respcd":"0000"}"#)
        .create_async()
        .await;

    let client = QfPayClient::new(ClientConfig::new(server.url(), APP_CODE, KEY)).unwrap();
    let mut extra = HashMap::new();
    extra.insert("goods_info".to_string(), "Tea & Cake, x2".to_string());

    let request = client
        .make_payment(PayType::PayMeQrCode, "INT-2", "Snacks", 99, &extra)
        .unwrap();

    let wire: Payload = url::form_urlencoded::parse(request.body().unwrap())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(wire.get("goods_info"), Some("Tea & Cake, x2"));

    let signature = request.headers()["x-qf-sign"].to_str().unwrap().to_string();
    assert_eq!(signature, crypto::generate_sign(&wire, KEY));

    request.send().await.unwrap();
}

#[tokio::test]
async fn test_gateway_rejection() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/trade/v1/query")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"respcd":"1150","resperr":"appcode not found","respmsg":"","data":[]}"#)
        .create_async()
        .await;

    let client = QfPayClient::new(ClientConfig::new(server.url(), APP_CODE, KEY)).unwrap();
    let err = client.query(&["INT-3"]).await.unwrap_err();

    match err {
        QfPayError::Gateway(envelope) => {
            assert_eq!(envelope.code, "1150");
            assert_eq!(envelope.err, "appcode not found");
            assert_eq!(
                envelope.to_string(),
                "Error: Code=1150, Message=appcode not found"
            );
        }
        other => panic!("expected gateway error, got {:?}", other),
    }
}
