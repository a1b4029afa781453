pub use api::{HealthStatus, PetApi};
pub use category::Category;
pub use clipboard::{Clipboard, ClipboardBackend, CopyMechanism, MemoryClipboard};
pub use config::{ClipboardConfig, Config, NotificationConfig, ServerConfig};
pub use coordinator::{
    Command, Completion, Coordinator, CoordinatorSettings, Domain, OperationState, Resolution,
    ServiceStatus,
};
pub use error::{CopyError, ServiceError};
pub use feedback::{Feedback, Notification, NotificationDurations, NotificationId, Severity};
pub use http::{HttpClient, HttpRequest, HttpResponse, MockHttpClient, ReqwestHttpClient};
pub use reconciler::{Presentation, Reconciler};
pub use selection::{CountDirection, RequestedCount, Selection};
pub use transport::{CallOptions, Transport, TransportSignal};

pub mod api;
pub mod category;
pub mod clipboard;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod feedback;
pub mod http;
pub mod reconciler;
pub mod selection;
pub mod transport;
