use anyhow::Context as _;
use serde::Deserialize;

use crate::domain::repository::SmsSender;

const SEND_URL: &str = "https://apis.aligo.in/send/";

/// SMS delivery via the Aligo bulk-message API.
#[derive(Clone)]
pub struct AligoSmsSender {
    pub http: reqwest::Client,
    pub api_key: String,
    pub account_id: String,
    pub sender: String,
}

#[derive(Deserialize)]
struct SendResponse {
    result_code: i32,
    message: String,
}

impl SmsSender for AligoSmsSender {
    async fn send_to_one(&self, receiver: &str, content: &str) -> anyhow::Result<()> {
        let form = [
            ("key", self.api_key.as_str()),
            ("user_id", self.account_id.as_str()),
            ("sender", self.sender.as_str()),
            ("receiver", receiver),
            ("msg", content),
        ];
        let resp = self
            .http
            .post(SEND_URL)
            .form(&form)
            .send()
            .await
            .context("send sms request")?;

        let body: SendResponse = resp.json().await.context("decode sms response")?;
        // Aligo signals success with result_code 1.
        if body.result_code != 1 {
            anyhow::bail!("sms provider rejected message: {}", body.message);
        }
        Ok(())
    }
}
