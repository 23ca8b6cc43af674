//! LLM 服务 - 业务能力层
//!
//! 只负责"调用 AI 评分"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（如 Gemini 的 OpenAI 兼容端点）
//! - 每次调用有超时上限，不重试

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::services::prompt::GRADING_SYSTEM_MESSAGE;

/// 连通性检测的超时
const PING_TIMEOUT_SECS: u64 = 10;

/// LLM 服务
///
/// 职责：
/// - 发送评分请求并返回原始文本
/// - 只处理单份提交
/// - 不解析回复内容
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    has_api_key: bool,
    timeout_secs: u64,
    max_output_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            has_api_key: !config.llm_api_key.trim().is_empty(),
            timeout_secs: config.llm_timeout_secs,
            max_output_tokens: config.llm_max_output_tokens,
        }
    }

    /// 发送一次评分请求
    ///
    /// 超时、网络错误、空回复都返回错误，由调用方转换成 ServiceUnavailable 记录
    pub async fn request_grading(&self, prompt: &str) -> AppResult<String> {
        if !self.has_api_key {
            return Err(LlmError::MissingApiKey.into());
        }

        let call = self.send_to_llm(prompt, Some(GRADING_SYSTEM_MESSAGE), self.max_output_tokens);
        match tokio::time::timeout(Duration::from_secs(self.timeout_secs), call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("LLM API 调用超时 ({} 秒)", self.timeout_secs);
                Err(LlmError::Timeout {
                    model: self.model_name.clone(),
                    timeout_secs: self.timeout_secs,
                }
                .into())
            }
        }
    }

    /// 检测 API 是否可用
    pub async fn ping(&self) -> bool {
        if !self.has_api_key {
            return false;
        }

        let call = self.send_to_llm("Hello, this is a test message.", None, 10);
        matches!(
            tokio::time::timeout(Duration::from_secs(PING_TIMEOUT_SECS), call).await,
            Ok(Ok(_))
        )
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    /// - `max_tokens`: 最大输出 token 数
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去掉首尾空白）
    async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        max_tokens: u32,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(request_build_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(request_build_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 评分需要尽量确定的输出
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.0)
            .top_p(0.1)
            .max_tokens(max_tokens)
            .build()
            .map_err(request_build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}

fn request_build_failed(err: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::Llm(LlmError::RequestBuildFailed {
        source: Box::new(err),
    })
}
