//! The session's home context. One task owns the [`Session`] and handles
//! commands in arrival order; route requests run on their own tasks and post
//! their outcome back through the same mailbox.

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use tokio::sync::oneshot;
use uuid::Uuid;

use super::{request_route, MapSnapshot, Session};
use crate::{
    api::{MapAPI, PinAPI, TransportAPI, API},
    entities::{Coordinates, LongPress, Pin, Route, RouteRequest, TransportMode},
    error::{unexpected_error, Error},
    external::DynDirections,
    surface::MapSurface,
};

type Reply<T> = oneshot::Sender<Result<T, Error>>;

enum Command {
    LongPress {
        event: LongPress,
        reply: Reply<Option<Pin>>,
    },
    AddPin {
        coordinates: Coordinates,
        reply: Reply<Pin>,
    },
    ListPins {
        reply: Reply<Vec<Pin>>,
    },
    DeleteLastPin {
        reply: Reply<Pin>,
    },
    DeleteAllPins {
        reply: Reply<usize>,
    },
    SetTransportMode {
        mode: TransportMode,
        reply: Reply<TransportMode>,
    },
    UserLocation {
        coordinates: Coordinates,
        reply: Reply<()>,
    },
    Snapshot {
        reply: Reply<MapSnapshot>,
    },
    RouteResolved {
        ticket: Uuid,
        result: Result<Route, Error>,
    },
    Shutdown,
}

struct Runtime<S> {
    session: Session<S>,
    provider: DynDirections,
    sender: Sender<Command>,
    receiver: Receiver<Command>,
}

/// Moves the session onto its own task and returns a handle to it. Must be
/// called from within a tokio runtime.
pub fn spawn<S: MapSurface>(session: Session<S>, provider: DynDirections) -> SessionHandle {
    let (sender, receiver) = async_channel::unbounded();

    let runtime = Runtime {
        session,
        provider,
        sender: sender.clone(),
        receiver,
    };

    tokio::spawn(runtime.run());

    SessionHandle {
        _closer: Arc::new(Closer(sender.clone())),
        sender,
    }
}

impl<S: MapSurface> Runtime<S> {
    async fn run(mut self) {
        tracing::info!("session started");

        while let Ok(command) = self.receiver.recv().await {
            if let Command::Shutdown = command {
                break;
            }

            self.handle(command);
        }

        // drop queued commands so their callers see the session as gone
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}

        tracing::info!("session stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::LongPress { event, reply } => {
                let result = self.session.handle_long_press(event).map(|added| {
                    added.map(|added| {
                        self.dispatch(added.route_request);
                        added.pin
                    })
                });
                let _ = reply.send(result);
            }
            Command::AddPin { coordinates, reply } => {
                let result = self.session.add_pin(coordinates).map(|added| {
                    self.dispatch(added.route_request);
                    added.pin
                });
                let _ = reply.send(result);
            }
            Command::ListPins { reply } => {
                let _ = reply.send(Ok(self.session.pins().to_vec()));
            }
            Command::DeleteLastPin { reply } => {
                let result = self.session.delete_last_pin().map(|removed| removed.pin);
                let _ = reply.send(result);
            }
            Command::DeleteAllPins { reply } => {
                let _ = reply.send(self.session.delete_all_pins());
            }
            Command::SetTransportMode { mode, reply } => {
                for request in self.session.set_transport_mode(mode) {
                    self.dispatch(Some(request));
                }
                let _ = reply.send(Ok(self.session.transport_mode()));
            }
            Command::UserLocation { coordinates, reply } => {
                let result = coordinates
                    .validate()
                    .map(|coordinates| self.session.user_location_updated(coordinates));
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(Ok(self.session.snapshot()));
            }
            Command::RouteResolved { ticket, result } => {
                self.session.apply_route(ticket, result);
            }
            Command::Shutdown => {}
        }
    }

    /// Fire and forget: the request runs on its own task and reports back
    /// through the mailbox.
    fn dispatch(&self, request: Option<RouteRequest>) {
        let request = match request {
            Some(request) => request,
            None => return,
        };

        let provider = self.provider.clone();
        let sender = self.sender.clone();

        tokio::spawn(async move {
            let task =
                tokio::spawn(async move { request_route(provider.as_ref(), &request).await });

            // a panicking provider still has to release its ticket
            let result = match task.await {
                Ok(result) => result,
                Err(err) => {
                    tracing::error!(ticket = %request.ticket, "route task failed: {}", err);
                    Err(unexpected_error())
                }
            };

            let command = Command::RouteResolved {
                ticket: request.ticket,
                result,
            };

            if sender.send(command).await.is_err() {
                tracing::debug!(ticket = %request.ticket, "session gone before route resolved");
            }
        });
    }
}

/// Shared by every clone of a handle. Dropping the last one stops the session.
struct Closer(Sender<Command>);

impl Drop for Closer {
    fn drop(&mut self) {
        let _ = self.0.try_send(Command::Shutdown);
    }
}

/// Cheap to clone. The session task runs until [`SessionHandle::shutdown`] is
/// called or the last clone is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    sender: Sender<Command>,
    _closer: Arc<Closer>,
}

impl SessionHandle {
    async fn call<T, F>(&self, command: F) -> Result<T, Error>
    where
        T: Send,
        F: FnOnce(Reply<T>) -> Command + Send,
    {
        let (reply, response) = oneshot::channel();

        self.sender
            .send(command(reply))
            .await
            .map_err(|_| unexpected_error())?;

        response.await.map_err(|_| unexpected_error())?
    }

    /// Stops the session task once the commands already queued are handled.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(Command::Shutdown).await;
    }
}

#[async_trait]
impl PinAPI for SessionHandle {
    #[tracing::instrument(skip(self))]
    async fn long_press(&self, event: LongPress) -> Result<Option<Pin>, Error> {
        self.call(|reply| Command::LongPress { event, reply }).await
    }

    #[tracing::instrument(skip(self))]
    async fn add_pin(&self, coordinates: Coordinates) -> Result<Pin, Error> {
        self.call(|reply| Command::AddPin { coordinates, reply }).await
    }

    async fn list_pins(&self) -> Result<Vec<Pin>, Error> {
        self.call(|reply| Command::ListPins { reply }).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_last_pin(&self) -> Result<Pin, Error> {
        self.call(|reply| Command::DeleteLastPin { reply }).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_all_pins(&self) -> Result<usize, Error> {
        self.call(|reply| Command::DeleteAllPins { reply }).await
    }
}

#[async_trait]
impl TransportAPI for SessionHandle {
    #[tracing::instrument(skip(self))]
    async fn set_transport_mode(&self, mode: TransportMode) -> Result<TransportMode, Error> {
        self.call(|reply| Command::SetTransportMode { mode, reply }).await
    }
}

#[async_trait]
impl MapAPI for SessionHandle {
    #[tracing::instrument(skip(self))]
    async fn update_user_location(&self, coordinates: Coordinates) -> Result<(), Error> {
        self.call(|reply| Command::UserLocation { coordinates, reply }).await
    }

    async fn snapshot(&self) -> Result<MapSnapshot, Error> {
        self.call(|reply| Command::Snapshot { reply }).await
    }
}

impl API for SessionHandle {}
