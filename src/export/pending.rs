use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt as _;
use futures::future::BoxFuture;
use parking_lot::Mutex;

use super::rasterizer::EncodedImage;
use crate::error::ExportError;

type Outcome = Result<EncodedImage, ExportError>;

/// A rasterization running off the UI path.
///
/// The outcome lands in a shared slot that the UI polls once per frame.
/// Native builds drive the future on a worker thread, web builds on the
/// browser's event loop.
pub struct PendingExport {
    slot: Arc<Mutex<Option<Outcome>>>,
}

impl PendingExport {
    pub fn spawn(future: BoxFuture<'static, Outcome>, ctx: egui::Context) -> Self {
        let slot = Arc::new(Mutex::new(None));
        Self::run(future, Arc::clone(&slot), ctx);
        Self { slot }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn run(future: BoxFuture<'static, Outcome>, slot: Arc<Mutex<Option<Outcome>>>, ctx: egui::Context) {
        let worker_slot = Arc::clone(&slot);
        let spawned = std::thread::Builder::new()
            .name("export".to_owned())
            .spawn(move || {
                let outcome = futures::executor::block_on(guarded(future));
                *worker_slot.lock() = Some(outcome);
                ctx.request_repaint();
            });
        if let Err(err) = spawned {
            *slot.lock() = Some(Err(ExportError::Io(err)));
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn run(future: BoxFuture<'static, Outcome>, slot: Arc<Mutex<Option<Outcome>>>, ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = guarded(future).await;
            *slot.lock() = Some(outcome);
            ctx.request_repaint();
        });
    }

    /// Takes the outcome if the rasterizer has finished
    pub fn poll(&self) -> Option<Outcome> {
        self.slot.lock().take()
    }
}

/// Turns a panicking rasterizer into a failed export so the slot is always filled
async fn guarded(future: BoxFuture<'static, Outcome>) -> Outcome {
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => Err(ExportError::Rasterize(format!(
            "rasterizer panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}
