//! Middleware capability registry.
//!
//! Middleware attaches to a server under one of a closed set of capability
//! tags. Attachment is validated structurally: the name a middleware
//! identifies itself by must resolve to a recognized capability, otherwise
//! [`Error::InvalidMiddleware`] is returned.
//!
//! The attached stack is ordered but not yet consulted during dispatch. The
//! hook contract is fixed here so capabilities can grow into it: when a
//! dispatch pipeline lands, [`Middleware::before_request`] runs in attachment
//! order (a `Some` response short-circuits the route), and
//! [`Middleware::after_response`] runs over the outgoing response in the same
//! order.

use tracing::info;

use crate::error::Error;
use crate::http::request::Request;
use crate::http::response::Response;

/// The closed set of database drivers the `Database` capability covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseDriver {
    MongoDb,
    MySql,
    Sqlite,
    PostgreSql,
    MariaDb,
    Redis,
    Firebase,
    TursoDb,
}

impl DatabaseDriver {
    pub fn name(&self) -> &'static str {
        match self {
            DatabaseDriver::MongoDb => "mongodb",
            DatabaseDriver::MySql => "mysql",
            DatabaseDriver::Sqlite => "sqlite",
            DatabaseDriver::PostgreSql => "postgresql",
            DatabaseDriver::MariaDb => "mariadb",
            DatabaseDriver::Redis => "redis",
            DatabaseDriver::Firebase => "firebase",
            DatabaseDriver::TursoDb => "tursodb",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "mongodb" => Some(DatabaseDriver::MongoDb),
            "mysql" => Some(DatabaseDriver::MySql),
            "sqlite" => Some(DatabaseDriver::Sqlite),
            "postgresql" => Some(DatabaseDriver::PostgreSql),
            "mariadb" => Some(DatabaseDriver::MariaDb),
            "redis" => Some(DatabaseDriver::Redis),
            "firebase" => Some(DatabaseDriver::Firebase),
            "tursodb" => Some(DatabaseDriver::TursoDb),
            _ => None,
        }
    }
}

/// The closed set of middleware capability tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Database(DatabaseDriver),
    Authentication,
    Authorization,
    RateLimit,
    Cache,
    Logger,
}

impl Capability {
    /// The canonical attachment name for this capability.
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Database(driver) => driver.name(),
            Capability::Authentication => "authentication",
            Capability::Authorization => "authorization",
            Capability::RateLimit => "rate-limit",
            Capability::Cache => "cache",
            Capability::Logger => "logger",
        }
    }

    /// Resolves an attachment name against the recognized set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "authentication" => Some(Capability::Authentication),
            "authorization" => Some(Capability::Authorization),
            "rate-limit" => Some(Capability::RateLimit),
            "cache" => Some(Capability::Cache),
            "logger" => Some(Capability::Logger),
            other => DatabaseDriver::from_name(other).map(Capability::Database),
        }
    }

    /// Instantiates the built-in middleware for this capability.
    pub fn instantiate(&self) -> Box<dyn Middleware> {
        match self {
            Capability::Database(DatabaseDriver::MongoDb) => Box::new(MongoDb),
            Capability::Database(driver) => Box::new(StubMiddleware {
                capability: Capability::Database(*driver),
            }),
            other => Box::new(StubMiddleware { capability: *other }),
        }
    }
}

/// An attachable middleware.
///
/// `before_request` may transform the request or short-circuit it by
/// returning a response; `after_response` may transform the outgoing
/// response. Both default to no-ops, which is all the built-in capability
/// stubs currently do.
pub trait Middleware: Send + Sync {
    fn capability(&self) -> Capability;

    /// The name this middleware identifies itself by; must resolve through
    /// [`Capability::from_name`] for attachment to be accepted.
    fn name(&self) -> &'static str {
        self.capability().name()
    }

    fn before_request(&self, _request: &mut Request) -> Option<Response> {
        None
    }

    fn after_response(&self, _response: &mut Response) {}
}

/// Placeholder middleware for capabilities without executable logic.
struct StubMiddleware {
    capability: Capability,
}

impl Middleware for StubMiddleware {
    fn capability(&self) -> Capability {
        self.capability
    }
}

/// MongoDB driver, the one capability with executable logic.
pub struct MongoDb;

impl MongoDb {
    pub fn connect(&self) {
        info!("Connected to MongoDB");
    }

    pub fn disconnect(&self) {
        info!("Disconnected from MongoDB");
    }
}

impl Middleware for MongoDb {
    fn capability(&self) -> Capability {
        Capability::Database(DatabaseDriver::MongoDb)
    }
}

/// The ordered list of middleware attached to a server.
///
/// Lives as long as the server; order of attachment is preserved.
#[derive(Default)]
pub struct MiddlewareStack {
    entries: Vec<Box<dyn Middleware>>,
}

impl MiddlewareStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the built-in middleware registered under `name`.
    pub fn attach(&mut self, name: &str) -> Result<(), Error> {
        let capability =
            Capability::from_name(name).ok_or_else(|| Error::InvalidMiddleware(name.to_string()))?;
        self.entries.push(capability.instantiate());
        Ok(())
    }

    /// Attaches a caller-supplied middleware after validating that the name
    /// it reports resolves to the capability it claims.
    pub fn attach_boxed(&mut self, middleware: Box<dyn Middleware>) -> Result<(), Error> {
        match Capability::from_name(middleware.name()) {
            Some(capability) if capability == middleware.capability() => {
                self.entries.push(middleware);
                Ok(())
            }
            _ => Err(Error::InvalidMiddleware(middleware.name().to_string())),
        }
    }

    /// Attachment names, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|m| m.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Middleware> {
        self.entries.iter().map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
