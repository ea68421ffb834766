//! Interaction client: simulated clicks/selections and component-carrying
//! message requests.
//!
//! Every operation validates its inputs first and only then builds a single
//! [`ApiRequest`] for the injected [`HttpTransport`]. Transport failures are
//! passed through as [`TransportError`] without retrying here; retry policy
//! belongs to the transport.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::codec::{ComponentInput, ComponentTree};
use crate::component_message::ComponentMessage;
use crate::error::{ComponentError, Result, TransportError};
use crate::http::{ApiRequest, FileAttachment, HttpMethod, HttpTransport};
use crate::session::{NoSession, SessionProvider};
use crate::types::component::{Button, ComponentType, Select, SelectOption};
use crate::types::ext::MessageExt;
use crate::types::id::{ChannelMarker, Id, MessageMarker};
use crate::types::interaction::{
    ComponentInteraction, ComponentInteractionData, InteractionCallbackBody,
    InteractionCallbackData, InteractionResponse,
};
use crate::types::message::{check_limits, AllowedMentions, CreateMessage, EditMessage, Message};

fn to_body(value: &impl Serialize) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| TransportError::Serde(e.to_string()).into())
}

/// Issues component requests against Discord.
///
/// Cheap to clone; clones share the transport and session provider.
#[derive(Clone)]
pub struct InteractionClient {
    http: Arc<dyn HttpTransport>,
    session: Arc<dyn SessionProvider>,
    allowed_mentions: Option<AllowedMentions>,
}

impl InteractionClient {
    /// A client with no gateway session; simulated interactions omit
    /// `session_id`.
    pub fn new(http: Arc<dyn HttpTransport>) -> Self {
        Self {
            http,
            session: Arc::new(NoSession),
            allowed_mentions: None,
        }
    }

    /// Use `session` to tag simulated interactions.
    pub fn with_session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = session;
        self
    }

    /// Mentions applied to every send and edit; a body's own
    /// `allowed_mentions` is merged on top.
    pub fn with_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    fn resolve_mentions(&self, explicit: Option<AllowedMentions>) -> Option<AllowedMentions> {
        match (&self.allowed_mentions, explicit) {
            (Some(default), Some(explicit)) => Some(default.merge(&explicit)),
            (Some(default), None) => Some(default.clone()),
            (None, explicit) => explicit,
        }
    }

    /// Client backed by [`DiscordHttpClient`](crate::http::DiscordHttpClient).
    #[cfg(feature = "io")]
    pub fn from_config(config: crate::config::ClientConfig) -> Self {
        Self::new(Arc::new(crate::http::DiscordHttpClient::new(config)))
    }

    async fn send(&self, request: ApiRequest) -> Result<Value> {
        debug!(
            route = %request.route_key,
            files = request.files.len(),
            "{}",
            request.describe()
        );
        Ok(self.http.request(request).await?)
    }

    // ------------------------------------------------------------------
    // Simulated interactions
    // ------------------------------------------------------------------

    async fn interact(&self, message: &Message, data: ComponentInteractionData) -> Result<Value> {
        let session_id = self.session.session_id().await;
        let body = InteractionCallbackBody::for_message(message, data, session_id);
        let request = ApiRequest::new(HttpMethod::Post, "interactions", "POST /interactions")
            .json(to_body(&body)?);
        self.send(request).await
    }

    /// Simulate clicking `button` on `message`.
    ///
    /// Link buttons and disabled buttons can't be clicked; both fail with
    /// [`ComponentError::NotClickable`] before any request is made.
    pub async fn click_button(&self, message: &Message, button: &Button) -> Result<Value> {
        let not_clickable = |reason| ComponentError::NotClickable {
            custom_id: button.custom_id().map(str::to_string),
            reason,
        };

        if button.style().is_link() {
            return Err(not_clickable("link buttons open a URL instead of sending an interaction"));
        }
        if button.is_disabled() {
            return Err(not_clickable("button is disabled"));
        }
        let custom_id = button
            .custom_id()
            .ok_or_else(|| not_clickable("button has no custom_id"))?;

        self.interact(
            message,
            ComponentInteractionData {
                component_type: ComponentType::Button,
                custom_id: custom_id.to_string(),
                values: None,
            },
        )
        .await
    }

    /// Simulate choosing `option` in `select` on `message`.
    pub async fn select_option(
        &self,
        message: &Message,
        select: &Select,
        option: &SelectOption,
    ) -> Result<Value> {
        if !select.contains(option) {
            return Err(ComponentError::OptionNotInSelect {
                custom_id: select.custom_id().to_string(),
                value: option.value.clone(),
            });
        }

        self.interact(
            message,
            ComponentInteractionData {
                component_type: ComponentType::Select,
                custom_id: select.custom_id().to_string(),
                values: Some(vec![option.value.clone()]),
            },
        )
        .await
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    /// Wrap a received message payload.
    pub fn message_from_payload(&self, payload: Value) -> Result<ComponentMessage> {
        let message: Message = serde_json::from_value(payload)
            .map_err(|e| ComponentError::InvalidMessage(e.to_string()))?;
        Ok(ComponentMessage::new(self.clone(), message))
    }

    /// Post a message with a full create body.
    pub async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        mut body: CreateMessage,
    ) -> Result<ComponentMessage> {
        body.validate()?;
        let files = std::mem::take(&mut body.files);
        let delete_after = body.delete_after.take();

        let mut mentions = self.resolve_mentions(body.allowed_mentions.take());
        if let Some(mention) = body.mention_author.take() {
            mentions.get_or_insert_with(AllowedMentions::none).replied_user = Some(mention);
        }
        body.allowed_mentions = mentions;

        let request = ApiRequest::new(
            HttpMethod::Post,
            format!("channels/{channel_id}/messages"),
            format!("POST /channels/{channel_id}/messages"),
        )
        .json(to_body(&body)?)
        .files(files);

        let payload = self.send(request).await?;
        let sent = self.message_from_payload(payload)?;
        if let Some(delay) = delete_after {
            self.schedule_delete(sent.message().clone(), delay);
        }
        Ok(sent)
    }

    /// Post `content` with `components` attached.
    ///
    /// The components are grouped and validated before anything is sent.
    pub async fn send_with_components(
        &self,
        channel_id: Id<ChannelMarker>,
        content: impl Into<String>,
        components: impl Into<ComponentInput>,
    ) -> Result<ComponentMessage> {
        let tree = ComponentTree::build(components)?;
        let content = content.into();
        let mut body = CreateMessage::new().components(tree);
        if !content.is_empty() {
            body = body.content(content);
        }
        self.send_message(channel_id, body).await
    }

    /// Apply `edit` to `message`.
    ///
    /// Returns `Ok(None)` without a request when the message is ephemeral or
    /// the edit sets nothing. `delete_after` is still honoured for an empty
    /// edit.
    pub async fn edit_message(
        &self,
        message: &Message,
        mut edit: EditMessage,
    ) -> Result<Option<ComponentMessage>> {
        edit.validate()?;
        if message.is_ephemeral() {
            debug!(message_id = %message.id, "skipping edit of ephemeral message");
            return Ok(None);
        }
        let delete_after = edit.delete_after.take();
        if edit.is_empty() {
            debug!(message_id = %message.id, "skipping empty edit");
            if let Some(delay) = delete_after {
                self.schedule_delete(message.clone(), delay);
            }
            return Ok(None);
        }

        edit.allowed_mentions = self.resolve_mentions(edit.allowed_mentions.take());
        let files = std::mem::take(&mut edit.files);
        let request = ApiRequest::new(
            HttpMethod::Patch,
            format!("channels/{}/messages/{}", message.channel_id, message.id),
            format!("PATCH /channels/{}/messages/{{id}}", message.channel_id),
        )
        .json(to_body(&edit)?)
        .files(files);

        let payload = self.send(request).await?;
        let edited = self.message_from_payload(payload)?;
        if let Some(delay) = delete_after {
            self.schedule_delete(message.clone(), delay);
        }
        Ok(Some(edited))
    }

    /// Replace the components on `message`.
    pub async fn edit_with_components(
        &self,
        message: &Message,
        components: impl Into<ComponentInput>,
    ) -> Result<Option<ComponentMessage>> {
        let tree = ComponentTree::build(components)?;
        self.edit_message(message, EditMessage::new().components(tree))
            .await
    }

    pub async fn fetch_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> Result<ComponentMessage> {
        let request = ApiRequest::new(
            HttpMethod::Get,
            format!("channels/{channel_id}/messages/{message_id}"),
            format!("GET /channels/{channel_id}/messages/{{id}}"),
        );
        let payload = self.send(request).await?;
        self.message_from_payload(payload)
    }

    /// Delete `message`; a no-op for ephemeral messages.
    pub async fn delete_message(&self, message: &Message) -> Result<()> {
        if message.is_ephemeral() {
            debug!(message_id = %message.id, "skipping delete of ephemeral message");
            return Ok(());
        }
        let request = ApiRequest::new(
            HttpMethod::Delete,
            format!("channels/{}/messages/{}", message.channel_id, message.id),
            format!("DELETE /channels/{}/messages/{{id}}", message.channel_id),
        );
        self.send(request).await?;
        Ok(())
    }

    /// Delete `message` after `delay` on a background task.
    ///
    /// Must be called from inside a tokio runtime.
    #[cfg(feature = "io")]
    pub fn delete_after(
        &self,
        message: Message,
        delay: Duration,
    ) -> tokio::task::JoinHandle<Result<()>> {
        let client = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = client.delete_message(&message).await;
            if let Err(e) = &result {
                warn!(message_id = %message.id, error = %e, "delayed delete failed");
            }
            result
        })
    }

    #[cfg(feature = "io")]
    fn schedule_delete(&self, message: Message, delay: Duration) {
        if tokio::runtime::Handle::try_current().is_err() {
            warn!(message_id = %message.id, "no tokio runtime, delete_after ignored");
            return;
        }
        debug!(message_id = %message.id, ?delay, "scheduling delete");
        drop(self.delete_after(message, delay));
    }

    #[cfg(not(feature = "io"))]
    fn schedule_delete(&self, message: Message, _delay: Duration) {
        warn!(message_id = %message.id, "delete_after needs the io feature, ignored");
    }

    // ------------------------------------------------------------------
    // Answering received interactions
    // ------------------------------------------------------------------

    /// Send the initial response to a received component interaction.
    pub async fn initial_response(
        &self,
        interaction: &ComponentInteraction,
        mut response: InteractionResponse,
    ) -> Result<()> {
        let files = match response.data.as_mut() {
            Some(data) => {
                check_limits(data.embeds.as_deref(), &data.files)?;
                std::mem::take(&mut data.files)
            }
            None => Vec::new(),
        };

        let request = ApiRequest::new(
            HttpMethod::Post,
            format!("interactions/{}/{}/callback", interaction.id, interaction.token),
            "POST /interactions/{id}/{token}/callback",
        )
        .json(to_body(&response)?)
        .files(files);

        // Discord answers 204 No Content.
        self.send(request).await?;
        Ok(())
    }

    /// Edit the original response to a received interaction.
    pub async fn edit_response(
        &self,
        interaction: &ComponentInteraction,
        mut data: InteractionCallbackData,
    ) -> Result<ComponentMessage> {
        check_limits(data.embeds.as_deref(), &data.files)?;
        let files: Vec<FileAttachment> = std::mem::take(&mut data.files);

        let request = ApiRequest::new(
            HttpMethod::Patch,
            format!(
                "webhooks/{}/{}/messages/@original",
                interaction.application_id, interaction.token
            ),
            format!(
                "PATCH /webhooks/{}/{{token}}/messages/@original",
                interaction.application_id
            ),
        )
        .json(to_body(&data)?)
        .files(files);

        let payload = self.send(request).await?;
        self.message_from_payload(payload)
    }
}

impl fmt::Debug for InteractionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::testing::{client, message_json};
    use crate::types::builders::{button, ButtonBuilder, SelectBuilder};
    use crate::types::component::{ButtonStyle, Component};
    use crate::types::message::MessageFlags;
    use futures_lite::future::block_on;
    use serde_json::json;
    use static_assertions::assert_impl_all;

    assert_impl_all!(InteractionClient: Send, Sync, Clone);

    fn message(flags: u64) -> Message {
        serde_json::from_value(message_json(flags)).unwrap()
    }

    fn tree_button(message: &Message, custom_id: &str) -> Button {
        let tree = crate::codec::decode(&message.components);
        tree.find(custom_id)
            .and_then(Component::as_button)
            .cloned()
            .unwrap()
    }

    #[test]
    fn click_sends_interaction_body() {
        block_on(async {
            let (client, transport) = client();
            let message = message(0);
            let yes = tree_button(&message, "yes");

            client.click_button(&message, &yes).await.unwrap();

            let requests = transport.requests().await;
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].method, HttpMethod::Post);
            assert_eq!(requests[0].path, "interactions");
            assert_eq!(
                requests[0].body,
                Some(json!({
                    "application_id": "900",
                    "channel_id": "200",
                    "guild_id": "100",
                    "type": "3",
                    "data": {"component_type": 2, "custom_id": "yes"},
                    "message_flags": 0,
                    "message_id": "300",
                    "session_id": "sess-1"
                }))
            );
        });
    }

    #[test]
    fn clicking_link_button_is_rejected_without_request() {
        block_on(async {
            let (client, transport) = client();
            let message = message(0);
            let link = ButtonBuilder::link("https://docs.rs")
                .label("Docs")
                .build()
                .unwrap();

            let err = client.click_button(&message, &link).await.unwrap_err();
            assert!(matches!(err, ComponentError::NotClickable { custom_id: None, .. }));
            assert!(transport.requests().await.is_empty());
        });
    }

    #[test]
    fn clicking_disabled_button_is_rejected() {
        block_on(async {
            let (client, transport) = client();
            let message = message(0);
            let no = tree_button(&message, "no");

            let err = client.click_button(&message, &no).await.unwrap_err();
            assert!(matches!(err, ComponentError::NotClickable { .. }));
            assert!(transport.requests().await.is_empty());
        });
    }

    #[test]
    fn select_option_sends_value() {
        block_on(async {
            let (client, transport) = client();
            let message = message(MessageFlags::SUPPRESS_EMBEDS.bits());
            let tree = crate::codec::decode(&message.components);
            let select = tree.find("lang").and_then(Component::as_select).unwrap();
            let go = select.option("go").unwrap();

            client.select_option(&message, select, go).await.unwrap();

            let body = transport.requests().await[0].body.clone().unwrap();
            assert_eq!(
                body["data"],
                json!({"component_type": 3, "custom_id": "lang", "values": ["go"]})
            );
            assert_eq!(body["message_flags"], 4);
        });
    }

    #[test]
    fn foreign_option_is_rejected_without_request() {
        block_on(async {
            let (client, transport) = client();
            let message = message(0);
            let select = SelectBuilder::new()
                .custom_id("lang")
                .option(SelectOption::new("Rust", "rust"))
                .build()
                .unwrap();

            let err = client
                .select_option(&message, &select, &SelectOption::new("Zig", "zig"))
                .await
                .unwrap_err();
            assert_eq!(
                err,
                ComponentError::OptionNotInSelect {
                    custom_id: "lang".into(),
                    value: "zig".into()
                }
            );
            assert!(transport.requests().await.is_empty());
        });
    }

    #[test]
    fn send_with_components_groups_and_decodes_reply() {
        block_on(async {
            let (client, transport) = client();
            transport.respond(Ok(message_json(0))).await;

            let buttons: Vec<Component> = (0..7)
                .map(|i| button(ButtonStyle::Primary, format!("{i}"), format!("b{i}")).unwrap())
                .collect();
            let sent = client
                .send_with_components(Id::new(200), "Pick one", buttons)
                .await
                .unwrap();

            let request = &transport.requests().await[0];
            assert_eq!(request.path, "channels/200/messages");
            let body = request.body.as_ref().unwrap();
            assert_eq!(body["content"], "Pick one");
            assert_eq!(body["components"].as_array().unwrap().len(), 2);

            assert_eq!(sent.message().id, 300);
            assert!(sent.find_component("lang").is_some());
        });
    }

    #[test]
    fn invalid_components_fail_before_send() {
        block_on(async {
            let (client, transport) = client();
            let rows: Vec<crate::types::component::ActionRow> = (0..6)
                .map(|i| {
                    crate::types::component::ActionRow::new(vec![
                        button(ButtonStyle::Primary, "x", format!("b{i}")).unwrap()
                    ])
                    .unwrap()
                })
                .collect();

            let err = client
                .send_with_components(Id::new(1), "", rows)
                .await
                .unwrap_err();
            assert_eq!(err, ComponentError::Validation(ValidationError::TooManyRows(6)));
            assert!(transport.requests().await.is_empty());
        });
    }

    #[test]
    fn send_with_files_passes_attachments_outside_body() {
        block_on(async {
            let (client, transport) = client();
            transport.respond(Ok(message_json(0))).await;

            let body = CreateMessage::new()
                .content("report")
                .file(FileAttachment::new("report.txt", b"ok".to_vec()));
            client.send_message(Id::new(200), body).await.unwrap();

            let request = &transport.requests().await[0];
            assert_eq!(request.files.len(), 1);
            assert_eq!(request.body, Some(json!({"content": "report"})));
        });
    }

    #[test]
    fn edit_of_ephemeral_message_is_a_no_op() {
        block_on(async {
            let (client, transport) = client();
            let message = message(MessageFlags::EPHEMERAL.bits());

            let edited = client
                .edit_message(&message, EditMessage::new().content("new"))
                .await
                .unwrap();
            assert!(edited.is_none());
            client.delete_message(&message).await.unwrap();
            assert!(transport.requests().await.is_empty());
        });
    }

    #[test]
    fn empty_edit_sends_nothing() {
        block_on(async {
            let (client, transport) = client();
            let edited = client
                .edit_message(&message(0), EditMessage::new())
                .await
                .unwrap();
            assert!(edited.is_none());
            assert!(transport.requests().await.is_empty());
        });
    }

    #[test]
    fn fetch_and_delete_use_message_routes() {
        block_on(async {
            let (client, transport) = client();
            transport.respond(Ok(message_json(0))).await;

            let fetched = client
                .fetch_message(Id::new(200), Id::new(300))
                .await
                .unwrap();
            client.delete_message(fetched.message()).await.unwrap();

            let requests = transport.requests().await;
            assert_eq!(requests[0].describe(), "GET /channels/200/messages/300");
            assert_eq!(requests[1].describe(), "DELETE /channels/200/messages/300");
        });
    }

    #[test]
    fn transport_errors_pass_through() {
        block_on(async {
            let (client, transport) = client();
            let failure = TransportError::Api {
                status: 404,
                body: "Unknown Message".into(),
                route: "GET /channels/200/messages/300".into(),
            };
            transport.respond(Err(failure.clone())).await;

            let err = client
                .fetch_message(Id::new(200), Id::new(300))
                .await
                .unwrap_err();
            assert_eq!(err, ComponentError::Transport(failure));
        });
    }

    #[test]
    fn malformed_payload_is_invalid_message() {
        let (client, _) = client();
        assert!(matches!(
            client.message_from_payload(json!({"id": "1"})),
            Err(ComponentError::InvalidMessage(_))
        ));
    }

    #[test]
    fn default_mentions_are_merged_into_sends() {
        block_on(async {
            let (client, transport) = client();
            let client = client.with_allowed_mentions(AllowedMentions::all());
            transport.respond(Ok(message_json(0))).await;
            transport.respond(Ok(message_json(0))).await;

            client
                .send_message(Id::new(200), CreateMessage::new().content("plain"))
                .await
                .unwrap();
            let quiet = AllowedMentions {
                replied_user: Some(false),
                ..Default::default()
            };
            client
                .send_message(
                    Id::new(200),
                    CreateMessage::new().content("quiet").allowed_mentions(quiet),
                )
                .await
                .unwrap();

            let requests = transport.requests().await;
            let everyone = json!(["roles", "users", "everyone"]);
            assert_eq!(
                requests[0].body.as_ref().unwrap()["allowed_mentions"],
                json!({"parse": everyone, "replied_user": true})
            );
            assert_eq!(
                requests[1].body.as_ref().unwrap()["allowed_mentions"],
                json!({"parse": everyone, "replied_user": false})
            );
        });
    }

    #[test]
    fn mention_author_becomes_replied_user() {
        block_on(async {
            let (client, transport) = client();
            transport.respond(Ok(message_json(0))).await;

            let reply = CreateMessage::new()
                .content("noted")
                .reply_to(Id::new(300))
                .mention_author(false);
            client.send_message(Id::new(200), reply).await.unwrap();

            let body = transport.requests().await[0].body.clone().unwrap();
            assert_eq!(
                body["allowed_mentions"],
                json!({"parse": [], "replied_user": false})
            );
        });
    }

    #[test]
    fn default_mentions_apply_to_edits_that_send() {
        block_on(async {
            let (client, transport) = client();
            let client = client.with_allowed_mentions(AllowedMentions::none());
            transport.respond(Ok(message_json(0))).await;

            let skipped = client
                .edit_message(&message(0), EditMessage::new())
                .await
                .unwrap();
            assert!(skipped.is_none());
            assert!(transport.requests().await.is_empty());

            client
                .edit_message(&message(0), EditMessage::new().content("edited"))
                .await
                .unwrap();
            let body = transport.requests().await[0].body.clone().unwrap();
            assert_eq!(
                body,
                json!({"content": "edited", "allowed_mentions": {"parse": []}})
            );
        });
    }

    #[test]
    fn delete_after_without_runtime_is_ignored() {
        block_on(async {
            let (client, transport) = client();
            transport.respond(Ok(message_json(0))).await;

            let body = CreateMessage::new()
                .content("temp")
                .delete_after(Duration::from_secs(1));
            client.send_message(Id::new(200), body).await.unwrap();
            assert_eq!(transport.requests().await.len(), 1);
        });
    }

    #[cfg(feature = "io")]
    #[tokio::test(start_paused = true)]
    async fn delete_after_removes_sent_message_later() {
        let (client, transport) = client();
        transport.respond(Ok(message_json(0))).await;

        let body = CreateMessage::new()
            .content("temp")
            .delete_after(Duration::from_secs(5));
        client.send_message(Id::new(200), body).await.unwrap();
        assert_eq!(transport.requests().await.len(), 1);

        tokio::time::sleep(Duration::from_secs(6)).await;
        let requests = transport.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].describe(), "DELETE /channels/200/messages/300");
    }

    #[cfg(feature = "io")]
    #[tokio::test(start_paused = true)]
    async fn empty_edit_still_schedules_delete() {
        let (client, transport) = client();

        let edited = client
            .edit_message(
                &message(0),
                EditMessage::new().delete_after(Duration::from_secs(2)),
            )
            .await
            .unwrap();
        assert!(edited.is_none());
        assert!(transport.requests().await.is_empty());

        tokio::time::sleep(Duration::from_secs(3)).await;
        let requests = transport.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Delete);
    }

    #[cfg(feature = "io")]
    #[tokio::test(start_paused = true)]
    async fn delayed_delete_skips_ephemeral_messages() {
        let (client, transport) = client();
        let handle = client.delete_after(
            message(MessageFlags::EPHEMERAL.bits()),
            Duration::from_secs(1),
        );
        handle.await.unwrap().unwrap();
        assert!(transport.requests().await.is_empty());
    }

    fn received(application_id: &str) -> ComponentInteraction {
        let interaction: crate::types::interaction::Interaction =
            serde_json::from_value(json!({
                "id": "77",
                "application_id": application_id,
                "type": 3,
                "token": "tok",
                "data": {"component_type": 2, "custom_id": "yes"},
                "message": message_json(0)
            }))
            .unwrap();
        ComponentInteraction::try_from(interaction).unwrap()
    }

    #[test]
    fn initial_response_posts_callback() {
        block_on(async {
            let (client, transport) = client();
            let response = InteractionResponse::update_message(
                InteractionCallbackData::new().content("done"),
            );
            client
                .initial_response(&received("900"), response)
                .await
                .unwrap();

            let request = &transport.requests().await[0];
            assert_eq!(request.describe(), "POST /interactions/77/tok/callback");
            assert_eq!(
                request.body,
                Some(json!({"type": 7, "data": {"content": "done"}}))
            );
        });
    }

    #[test]
    fn edit_response_targets_original() {
        block_on(async {
            let (client, transport) = client();
            transport.respond(Ok(message_json(0))).await;

            let data = InteractionCallbackData::new()
                .content("with file")
                .file(FileAttachment::new("a.txt", b"a".to_vec()));
            client
                .edit_response(&received("900"), data)
                .await
                .unwrap();

            let request = &transport.requests().await[0];
            assert_eq!(
                request.describe(),
                "PATCH /webhooks/900/tok/messages/@original"
            );
            assert_eq!(request.files.len(), 1);
        });
    }
}
