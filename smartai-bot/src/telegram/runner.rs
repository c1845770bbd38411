//! Update dispatching: converts teloxide updates to core events and passes them to the
//! HandlerChain, over long polling or a webhook, with the health server supervised alongside.

use anyhow::Result;
use axum::Router;
use handler_chain::HandlerChain;
use smartai_core::{BotError, ToCoreMessage};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use teloxide::dispatching::{DefaultKey, ShutdownToken, UpdateHandler};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::update_listeners::webhooks;
use teloxide::RequestError;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use crate::mention::SharedIdentity;

/// Fetches the bot's own id and username with `getMe` and stores them for gating.
#[instrument(skip(bot, identity))]
pub async fn fetch_identity(bot: &teloxide::Bot, identity: &SharedIdentity) -> Result<()> {
    let me = bot
        .get_me()
        .await
        .map_err(|e| BotError::Bot(format!("getMe failed: {}", e)))?;
    let mut guard = identity.write().await;
    guard.id = Some(me.user.id.0 as i64);
    guard.username = me.user.username.clone();
    info!(
        bot_id = me.user.id.0,
        username = ?guard.username,
        "Bot identity set before dispatching"
    );
    Ok(())
}

/// Runs the chain for one event in its own task so updates never wait on each other.
fn spawn_chain(chain: HandlerChain, message: smartai_core::Message) {
    tokio::spawn(async move {
        if let Err(e) = chain.handle(&message).await {
            error!(
                error = %e,
                user_id = message.user.id,
                chat_id = message.chat.id,
                "Handler chain failed"
            );
        }
    });
}

async fn on_message(msg: Message, chain: HandlerChain) -> Result<(), RequestError> {
    let Some(core_msg) = TelegramMessageWrapper(&msg).to_core() else {
        info!(chat_id = msg.chat.id.0, "Ignoring message without sender, text or photo");
        return Ok(());
    };
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        kind = core_msg.kind.label(),
        "Received message"
    );
    spawn_chain(chain, core_msg);
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, chain: HandlerChain) -> Result<(), RequestError> {
    bot.answer_callback_query(q.id.clone()).await?;
    match TelegramCallbackWrapper(&q).to_core() {
        Some(core_msg) => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                data = ?q.data,
                "Received button press"
            );
            spawn_chain(chain, core_msg);
        }
        None => warn!(user_id = q.from.id.0, "Button press without a source message, ignored"),
    }
    Ok(())
}

fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

fn build_dispatcher(bot: Bot, chain: HandlerChain) -> Dispatcher<Bot, RequestError, DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![chain])
        .enable_ctrlc_handler()
        .build()
}

/// Serves `app` until `stop` resolves or `cancel` fires; cancels `cancel` on exit either way.
async fn serve(
    listener: TcpListener,
    app: Router,
    stop: impl Future<Output = ()> + Send + 'static,
    cancel: CancellationToken,
) -> Result<()> {
    let signal = {
        let cancel = cancel.clone();
        async move {
            tokio::select! {
                _ = stop => {}
                _ = cancel.cancelled() => {}
            }
        }
    };
    let result = axum::serve(listener, app).with_graceful_shutdown(signal).await;
    cancel.cancel();
    info!("HTTP server stopped");
    result.map_err(anyhow::Error::from)
}

/// Once `cancel` fires, stops the dispatcher. Retries while it is still starting up; gives up
/// once `finished` shows the dispatcher already returned.
async fn stop_dispatcher_on_cancel(
    shutdown: ShutdownToken,
    cancel: CancellationToken,
    finished: CancellationToken,
) {
    cancel.cancelled().await;
    loop {
        if finished.is_cancelled() {
            return;
        }
        match shutdown.shutdown() {
            Ok(stopped) => {
                stopped.await;
                return;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(100)).await,
        }
    }
}

/// HTTP server task plus the task that stops the dispatcher when the server ends.
struct SupervisedTasks {
    cancel: CancellationToken,
    finished: CancellationToken,
    server: tokio::task::JoinHandle<Result<()>>,
    stopper: tokio::task::JoinHandle<()>,
}

impl SupervisedTasks {
    fn start(
        dispatcher: &Dispatcher<Bot, RequestError, DefaultKey>,
        listener: TcpListener,
        app: Router,
        stop: impl Future<Output = ()> + Send + 'static,
    ) -> Self {
        let cancel = CancellationToken::new();
        let finished = CancellationToken::new();
        let server = tokio::spawn(serve(listener, app, stop, cancel.clone()));
        let stopper = tokio::spawn(stop_dispatcher_on_cancel(
            dispatcher.shutdown_token(),
            cancel.clone(),
            finished.clone(),
        ));
        Self {
            cancel,
            finished,
            server,
            stopper,
        }
    }

    /// Called after the dispatcher returned: stops the server and waits for both tasks.
    async fn finish(self) -> Result<()> {
        info!("Dispatcher stopped");
        self.finished.cancel();
        self.cancel.cancel();
        if let Err(e) = self.stopper.await {
            warn!(error = %e, "Dispatcher stopper task failed");
        }
        self.server
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server task failed: {}", e))?
    }
}

/// Long polling; health server on `addr` alongside.
#[instrument(skip(bot, chain, health))]
pub async fn run_polling(bot: Bot, chain: HandlerChain, health: Router, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Health server listening (polling mode)");

    let mut dispatcher = build_dispatcher(bot, chain);
    let tasks = SupervisedTasks::start(&dispatcher, listener, health, std::future::pending());
    dispatcher.dispatch().await;
    tasks.finish().await
}

/// Webhook: registers `url` with Telegram and serves the update route and health routes on `addr`.
#[instrument(skip(bot, chain, health, url))]
pub async fn run_webhook(
    bot: Bot,
    chain: HandlerChain,
    health: Router,
    addr: SocketAddr,
    url: reqwest::Url,
) -> Result<()> {
    let host = url.host_str().unwrap_or_default().to_string();
    let options = webhooks::Options::new(addr, url);
    let (update_listener, stop_flag, webhook_router) = webhooks::axum_to_router(bot.clone(), options)
        .await
        .map_err(|e| BotError::Bot(format!("setWebhook failed: {}", e)))?;
    let app = webhook_router.merge(health);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, host = %host, "Webhook server listening");

    let mut dispatcher = build_dispatcher(bot, chain);
    let tasks = SupervisedTasks::start(&dispatcher, listener, app, stop_flag);
    dispatcher
        .dispatch_with_listener(
            update_listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;
    tasks.finish().await
}
