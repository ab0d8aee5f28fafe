pub mod choices;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod ids;
pub mod live;
pub mod logging;
pub mod models;
pub mod service;

#[cfg(test)]
mod test_utils;

use tokio::sync::OnceCell;

use std::{sync::Arc, time::Duration};

use iroh::Endpoint;
use tracing::info;
use zel_core::{prelude::RpcServerBuilder, protocol::RpcClient, IrohBundle};

use crate::{
    live::ChangeFeed,
    service::{
        admin::{AdminClient, AdminServer, AdminService},
        Services,
    },
};

pub type StartResult<T> = Result<T, Box<dyn std::error::Error>>;

static ADMIN_CORE: OnceCell<Arc<AdminCore>> = OnceCell::const_new();
static ALPN: &[u8] = b"courseadmin::0.1.0";

/// Process-wide handle, started on first use.
pub async fn core() -> StartResult<Arc<AdminCore>> {
    ADMIN_CORE
        .get_or_try_init(|| async move { AdminCore::start().await.map(Arc::new) })
        .await
        .cloned()
}

/// Main runtime handle for the admin backend.
pub struct AdminCore {
    pub config: config::AdminConfig,

    /// Repositories and the change feed, for in-process callers and live queries.
    pub services: Services,

    /// Server bundle that accepts inbound RPC traffic.
    pub server: IrohBundle,

    /// Client-side endpoint used by the dashboard to reach the local server.
    pub client_endpoint: Endpoint,

    /// Typed client for the local `admin` service.
    pub admin: AdminClient,
}

impl AdminCore {
    pub async fn start() -> StartResult<Self> {
        let config = config::get_or_init().await?;
        logging::init(&config);
        info!(database = %config.database_path().display(), "starting course admin");

        // ----------------
        // Server endpoint
        // ----------------
        let mut server_builder = IrohBundle::builder(Some(config.secret_key.clone())).await?;
        let server_endpoint = server_builder.endpoint().clone();

        let db = models::open_or_create_db(&config).await?;
        models::migrate_up(&db).await?;

        let feed = ChangeFeed::new(config.live_query_capacity);
        let services = Services::new(db, feed);

        let rpc_server_builder = RpcServerBuilder::new(ALPN, server_endpoint.clone());
        let rpc_server_builder =
            AdminService::new(services.clone()).register_service(rpc_server_builder);
        let rpc_server = rpc_server_builder.build();

        let server = server_builder.accept(ALPN, rpc_server).finish().await;
        server.wait_online().await;

        // ----------------
        // Client endpoint
        // ----------------
        let client_endpoint = Endpoint::builder()
            .secret_key(config.client_secret_key.clone())
            .alpns(vec![ALPN.to_vec()])
            .bind()
            .await?;

        client_endpoint.online().await;

        let conn = client_endpoint
            .connect(server.endpoint.addr(), ALPN)
            .await?;

        let rpc = RpcClient::new(conn).await?;
        let admin = AdminClient::new(rpc);
        info!("admin rpc online");

        Ok(Self {
            config,
            services,
            server,
            client_endpoint,
            admin,
        })
    }

    pub async fn shutdown(self) -> StartResult<()> {
        self.client_endpoint.close().await;
        self.server.shutdown(Duration::from_secs(5)).await?;
        info!("course admin stopped");
        Ok(())
    }
}

pub mod prelude {
    pub use super::choices;
    pub use super::config;
    pub use super::entity;
    pub use super::error;
    pub use super::ids;
    pub use super::live;
    pub use super::models;

    pub use super::service;
    pub use super::service::Services;

    pub use zel_core;
}
