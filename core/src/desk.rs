//! The desk: the dispatcher a rendering layer drives.
//!
//! Owns one query service and at most one open detail session.
//! Opening a detail view closes whatever view was open before.

use crate::{
    borrower::BorrowerRecord,
    clock::DeskClock,
    command::{BorrowerRef, DeskCommand, DeskResponse},
    config::DeskConfig,
    error::{DeskError, DeskResult},
    service::QueryService,
    session::{DetailSession, DetailView},
};

pub struct Desk {
    config:  DeskConfig,
    clock:   DeskClock,
    service: QueryService,
    session: Option<DetailSession>,
}

impl Desk {
    /// Validate `config`, generate the store and wire the service.
    pub fn build(config: DeskConfig, clock: DeskClock) -> DeskResult<Self> {
        config.validate()?;
        let service = QueryService::from_config(&config, clock);
        log::info!(
            "desk: seed={} borrowers={} tick={}ms",
            config.seed,
            service.store().len(),
            config.status_tick_ms
        );
        Ok(Self::with_service(service, config, clock))
    }

    /// Wire a desk around an existing service (fixed scenarios, tests).
    pub fn with_service(service: QueryService, config: DeskConfig, clock: DeskClock) -> Self {
        Self { config, clock, service, session: None }
    }

    pub fn service(&self) -> &QueryService {
        &self.service
    }

    pub fn session(&self) -> Option<&DetailSession> {
        self.session.as_ref()
    }

    pub async fn execute(&mut self, cmd: DeskCommand) -> DeskResult<DeskResponse> {
        let response = match cmd {
            DeskCommand::List { criteria } => DeskResponse::Page {
                result: self.service.list(&criteria).await,
            },
            DeskCommand::Get { id } => DeskResponse::Borrower {
                borrower: self.resolve(&id).await?,
            },
            DeskCommand::Analytics => DeskResponse::Analytics {
                analytics: self.service.analytics().await,
            },
            DeskCommand::OpenDetail { id } => DeskResponse::Detail {
                view: self.open_detail(&id).await?,
            },
            DeskCommand::Detail => DeskResponse::Detail {
                view: self.detail().await?,
            },
            DeskCommand::CloseDetail => DeskResponse::Closed {
                ticks: self.close_detail().await?,
            },
        };
        Ok(response)
    }

    /// Close any open view, fetch the borrower and start a new feed.
    /// A lookup failure or a bad tick period leaves no view open.
    pub async fn open_detail(&mut self, id: &BorrowerRef) -> DeskResult<DetailView> {
        if let Some(previous) = self.session.take() {
            previous.close().await;
        }
        let borrower = self.resolve(id).await?;
        let session = DetailSession::open(borrower, &self.config, self.clock)?;
        let view = session.view().await;
        self.session = Some(session);
        Ok(view)
    }

    pub async fn detail(&self) -> DeskResult<DetailView> {
        match &self.session {
            Some(session) => Ok(session.view().await),
            None => Err(DeskError::NoSession),
        }
    }

    pub async fn close_detail(&mut self) -> DeskResult<usize> {
        match self.session.take() {
            Some(session) => Ok(session.close().await),
            None => Err(DeskError::NoSession),
        }
    }

    /// Close the open view, if any.
    pub async fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            session.close().await;
        }
    }

    async fn resolve(&self, id: &BorrowerRef) -> DeskResult<BorrowerRecord> {
        match id {
            BorrowerRef::Id(id) => self.service.get_by_id(*id).await,
            BorrowerRef::Raw(raw) => self.service.get_by_raw_id(raw).await,
        }
    }
}
