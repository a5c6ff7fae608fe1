use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MwHeader {
    #[serde(rename = "MSGID")]
    pub msg_id: String,
    #[serde(rename = "SOURCECHANNEL")]
    pub source_channel: String,
    #[serde(rename = "TXNSEQ")]
    pub txn_seq: String,
    #[serde(rename = "RETURNCODE", skip_serializing_if = "Option::is_none")]
    pub return_code: Option<String>,
    #[serde(rename = "RETURNDESC", skip_serializing_if = "Option::is_none")]
    pub return_desc: Option<String>,
    #[serde(rename = "O360SEQ", skip_serializing_if = "Option::is_none")]
    pub o360_seq: Option<String>,
}

impl MwHeader {
    pub fn new(msg_id: &str, source_channel: &str, txn_seq: &str) -> Self {
        Self {
            msg_id: msg_id.to_string(),
            source_channel: source_channel.to_string(),
            txn_seq: txn_seq.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DemoRequest {
    #[serde(rename = "MWHEADER")]
    pub header: MwHeader,
    #[serde(rename = "TRANRQ")]
    pub tranrq: DemoTranRq,
}

#[derive(Debug, Default, Serialize)]
pub struct DemoTranRq {
    pub delay: i32,
    #[serde(rename = "forCount")]
    pub for_count: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct DemoResponse {
    #[serde(rename = "MWHEADER")]
    pub header: Option<MwHeader>,
    #[serde(rename = "TRANRS")]
    pub tranrs: Option<DemoTranRs>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DemoTranRs {
    pub env: Option<String>,
    pub data: Option<String>,
}

/// Thin typed client for the demo service endpoints.
pub struct DemoClient {
    client: Client,
    base_url: String,
}

impl DemoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run the delay + busy-loop operation.
    pub async fn demo(&self, header: MwHeader, delay: i32, for_count: i32) -> Result<DemoResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.post_typed("/demo", header, delay, for_count).await
    }

    /// Run the delay-only service path.
    pub async fn demo_service(&self, header: MwHeader, delay: i32) -> Result<DemoResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.post_typed("/demo/service", header, delay, 0).await
    }

    pub async fn camel(&self, header: MwHeader) -> Result<DemoResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.post_typed("/camel", header, 0, 0).await
    }

    /// Ask the service to relay a call to its configured internal endpoint.
    pub async fn httpclient(&self, header: MwHeader) -> Result<DemoResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.post_typed("/httpclient", header, 0, 0).await
    }

    pub async fn health(&self) -> Result<DemoResponse, Box<dyn std::error::Error + Send + Sync>> {
        let resp = self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        decode(resp).await
    }

    /// Post an arbitrary JSON body, leaving status handling to the caller.
    pub async fn post_raw(&self, path: &str, body: &serde_json::Value) -> Result<Response, reqwest::Error> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
    }

    async fn post_typed(&self, path: &str, header: MwHeader, delay: i32, for_count: i32) -> Result<DemoResponse, Box<dyn std::error::Error + Send + Sync>> {
        let req = DemoRequest {
            header,
            tranrq: DemoTranRq { delay, for_count },
        };
        let resp = self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&req)
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode(resp: Response) -> Result<DemoResponse, Box<dyn std::error::Error + Send + Sync>> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(format!("Service returned error status {}: {}", status, text).into());
    }

    Ok(serde_json::from_str::<DemoResponse>(&text)?)
}
