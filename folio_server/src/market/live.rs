use std::{fmt::Display, future::Future, sync::Arc};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocketUpgrade},
    },
    response::Response,
};
use folio_core::{
    market::dto::SearchCoin,
    search::debounce::{Debouncer, Keystroke},
};
use futures::{Sink, SinkExt, Stream, StreamExt};
use log::{debug, warn};
use serde::Serialize;

use crate::state::ServerState;

#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveSearchEvent {
    Results { query: String, coins: Vec<SearchCoin> },
    Cleared,
    Error { message: String },
}

/// Search-as-you-type over a WebSocket. Each text frame carries the current
/// contents of the search box.
#[utoipa::path(
    get,
    path = "/market/search/live",
    description = "WebSocket: send the search box contents, receive debounced results",
    responses(
        (status = 101, description = "Switching protocols"),
    )
)]
pub async fn live_search(
    ws: WebSocketUpgrade,
    State(server_state): State<Arc<ServerState>>,
) -> Response {
    ws.on_upgrade(move |socket| {
        let (outgoing, incoming) = socket.split();

        run_live_search(incoming, outgoing, move |query| {
            let server_state = server_state.clone();
            async move { server_state.market().search_coins(&query).await }
        })
    })
}

async fn send_event<K>(outgoing: &mut K, event: &LiveSearchEvent) -> Result<(), String>
where
    K: Sink<Message> + Unpin,
    K::Error: Display,
{
    let payload = serde_json::to_string(event).map_err(|e| e.to_string())?;
    outgoing
        .send(Message::Text(payload.into()))
        .await
        .map_err(|e| e.to_string())
}

pub(crate) async fn run_live_search<S, E, K, F, Fut>(mut incoming: S, mut outgoing: K, search: F)
where
    S: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
    K: Sink<Message> + Unpin,
    K::Error: Display,
    F: Fn(String) -> Fut,
    Fut: Future<Output = folio_core::Result<Vec<SearchCoin>>>,
{
    // dropped with the connection, taking any pending query with it
    let mut debouncer = Debouncer::default();

    loop {
        let event = tokio::select! {
            message = incoming.next() => match message {
                Some(Ok(Message::Text(text))) => match debouncer.push(text.as_str()) {
                    Keystroke::Cleared => LiveSearchEvent::Cleared,
                    Keystroke::Scheduled => continue,
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    debug!("Live search connection error: {}", e);
                    break;
                }
            },
            query = debouncer.ready() => {
                match search(query.clone()).await {
                    Ok(coins) => LiveSearchEvent::Results { query, coins },
                    Err(e) => {
                        warn!("Live search for {:?} failed: {}", query, e);
                        LiveSearchEvent::Error { message: e.to_string() }
                    }
                }
            }
        };

        if let Err(e) = send_event(&mut outgoing, &event).await {
            debug!("Live search client went away: {}", e);
            break;
        }
    }
}
