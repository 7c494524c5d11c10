//! Payment-related types

use crate::QfPayError;
use std::fmt;
use std::str::FromStr;

/// Payment channel requested from `/trade/v1/payment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayType {
    /// Alipay merchant-presented QR code in store (overseas merchants)
    AlipayQrCode,
    /// WeChat Pay merchant-presented QR code (overseas and HK merchants)
    WechatPayQrCode,
    /// PayMe merchant-presented QR code in store (HK merchants)
    PayMeQrCode,
    /// FPS merchant-presented QR code (HK merchants)
    FpsQrCode,
    /// Alipay in-app payment (HK merchants)
    AlipayApp,
    /// Alipay online WAP payment (HK merchants)
    AlipayWap,
}

impl PayType {
    /// Every supported pay type
    pub const ALL: [PayType; 6] = [
        PayType::AlipayQrCode,
        PayType::WechatPayQrCode,
        PayType::PayMeQrCode,
        PayType::FpsQrCode,
        PayType::AlipayApp,
        PayType::AlipayWap,
    ];

    /// The `pay_type` code sent on the wire
    pub fn code(&self) -> &'static str {
        match self {
            PayType::AlipayQrCode => "800101",
            PayType::WechatPayQrCode => "800201",
            PayType::PayMeQrCode => "805801",
            PayType::FpsQrCode => "802001",
            PayType::AlipayApp => "801510",
            PayType::AlipayWap => "801512",
        }
    }

    /// Short name accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            PayType::AlipayQrCode => "alipay_qr",
            PayType::WechatPayQrCode => "wechat_qr",
            PayType::PayMeQrCode => "payme_qr",
            PayType::FpsQrCode => "fps_qr",
            PayType::AlipayApp => "alipay_app",
            PayType::AlipayWap => "alipay_wap",
        }
    }

    /// Look up a pay type by its wire code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pay_type| pay_type.code() == code)
    }
}

impl AsRef<str> for PayType {
    fn as_ref(&self) -> &str {
        self.code()
    }
}

impl fmt::Display for PayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PayType {
    type Err = QfPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::from_code(s)
            .or_else(|| {
                let lower = s.to_ascii_lowercase();
                Self::ALL.into_iter().find(|pay_type| pay_type.name() == lower)
            })
            .ok_or_else(|| {
                QfPayError::invalid_request(format!(
                    "unknown pay type `{}`; expected a code such as 800101 or one of: {}",
                    s,
                    Self::ALL.map(|pay_type| pay_type.name()).join("|")
                ))
            })
    }
}
