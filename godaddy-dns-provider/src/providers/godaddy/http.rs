//! GoDaddy HTTP 请求方法

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::{ApiErrorBody, GodaddyProvider};

const JSON: &str = "application/json";

impl GodaddyProvider {
    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let url = format!("{}{path}", self.base_url);
        let builder = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);
        (builder, url)
    }

    fn with_body<B: Serialize + ?Sized>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<RequestBuilder> {
        let bytes = serde_json::to_vec(body).map_err(|e| self.serialization_error(e))?;
        log::debug!(
            "[{}] Request Body: {}",
            self.provider_name(),
            truncate_for_log(&String::from_utf8_lossy(&bytes))
        );
        Ok(builder.body(bytes))
    }

    /// 发送请求并返回成功响应体；>= 400 的状态映射为错误
    async fn send(
        &self,
        method: Method,
        builder: RequestBuilder,
        url: &str,
        ctx: &ErrorContext,
    ) -> Result<String> {
        let (status, body) = HttpUtils::execute_request_with_retry(
            builder,
            self.provider_name(),
            method.as_str(),
            url,
            self.retry,
            &self.cancel,
        )
        .await?;

        if status < 400 {
            return Ok(body);
        }

        let raw = match ApiErrorBody::parse(&body) {
            Some(ApiErrorBody {
                code: Some(code),
                message,
            }) => {
                log::debug!(
                    "[{}] {method} {url} failed: {code} {}",
                    self.provider_name(),
                    message.as_deref().unwrap_or_default()
                );
                RawApiError::with_code(status, code, body)
            }
            _ => RawApiError::new(status, body),
        };
        let err = self.map_error(raw, ctx);
        log::debug!("{err}");
        Err(err)
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, ctx: &ErrorContext) -> Result<T> {
        let (builder, url) = self.request(Method::GET, path);
        let body = self.send(Method::GET, builder, &url, ctx).await?;
        HttpUtils::parse_json(&body, self.provider_name())
    }

    /// 执行 PUT 请求，忽略响应体
    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        ctx: &ErrorContext,
    ) -> Result<()> {
        let (builder, url) = self.request(Method::PUT, path);
        let builder = self.with_body(builder, body)?;
        self.send(Method::PUT, builder, &url, ctx).await?;
        Ok(())
    }

    /// 执行 PATCH 请求，忽略响应体
    pub(crate) async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        ctx: &ErrorContext,
    ) -> Result<()> {
        let (builder, url) = self.request(Method::PATCH, path);
        let builder = self.with_body(builder, body)?;
        self.send(Method::PATCH, builder, &url, ctx).await?;
        Ok(())
    }

    /// 执行 POST 请求，忽略响应体
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        ctx: &ErrorContext,
    ) -> Result<()> {
        let (builder, url) = self.request(Method::POST, path);
        let builder = self.with_body(builder, body)?;
        self.send(Method::POST, builder, &url, ctx).await?;
        Ok(())
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, ctx: &ErrorContext) -> Result<()> {
        let (builder, url) = self.request(Method::DELETE, path);
        self.send(Method::DELETE, builder, &url, ctx).await?;
        Ok(())
    }
}
