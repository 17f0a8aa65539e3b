//! Typed Bot API methods.
//!
//! `Bot` holds a [`WebApiClient`] rather than being one, so the transport can be
//! swapped (tests, proxies) without touching the method surface.

use tokio_util::sync::CancellationToken;

use crate::{
    client::{WebApiClient, NO_BODY},
    query::QueryParams,
    types::{
        AnswerInlineQuery, Chat, ChatId, ChatMember, File, Message, SendMessage, SendPhoto,
        SetWebhook, User, WebhookInfo,
    },
    Result,
};

#[derive(Clone)]
pub struct Bot {
    client: WebApiClient,
}

impl Bot {
    pub fn new(client: WebApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &WebApiClient {
        &self.client
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        self.client.cancellation_token()
    }

    pub async fn get_me(&self) -> Result<User> {
        self.client.get("getMe", None).await
    }

    pub async fn send_message(&self, req: &SendMessage) -> Result<Message> {
        self.client.post("sendMessage", None, Some(req)).await
    }

    pub async fn send_photo(&self, req: &SendPhoto) -> Result<Message> {
        self.client.post("sendPhoto", None, Some(req)).await
    }

    pub async fn get_chat(&self, chat_id: &ChatId) -> Result<Chat> {
        self.client.get("getChat", Some(&chat_query(chat_id))).await
    }

    pub async fn get_chat_member(&self, chat_id: &ChatId, user_id: i64) -> Result<ChatMember> {
        let params = chat_query(chat_id).with("user_id", user_id);
        self.client.get("getChatMember", Some(&params)).await
    }

    pub async fn get_chat_administrators(&self, chat_id: &ChatId) -> Result<Vec<ChatMember>> {
        self.client
            .get("getChatAdministrators", Some(&chat_query(chat_id)))
            .await
    }

    pub async fn leave_chat(&self, chat_id: &ChatId) -> Result<bool> {
        self.client
            .post("leaveChat", Some(&chat_query(chat_id)), NO_BODY)
            .await
    }

    pub async fn get_file(&self, file_id: &str) -> Result<File> {
        let params = QueryParams::new().with("file_id", file_id);
        self.client.get("getFile", Some(&params)).await
    }

    pub async fn answer_inline_query(&self, req: &AnswerInlineQuery) -> Result<bool> {
        self.client.post("answerInlineQuery", None, Some(req)).await
    }

    pub async fn set_webhook(&self, req: &SetWebhook) -> Result<bool> {
        self.client.post("setWebhook", None, Some(req)).await
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool> {
        let params = QueryParams::new().with("drop_pending_updates", drop_pending_updates);
        self.client.post("deleteWebhook", Some(&params), NO_BODY).await
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.client.get("getWebhookInfo", None).await
    }
}

fn chat_query(chat_id: &ChatId) -> QueryParams {
    QueryParams::new().with("chat_id", chat_id.to_canonical_string())
}
