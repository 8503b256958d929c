use std::collections::{BTreeMap, HashMap};

use crate::error::Error;
use crate::http::request::Method;
use crate::router::handler::Handler;

/// One segment of a parsed route template.
///
/// `<name>` in a registered path becomes a `Param` that matches any single
/// non-empty path segment and binds it under `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug)]
struct RouteEntry {
    segments: Vec<Segment>,
    methods: HashMap<Method, Handler>,
}

impl RouteEntry {
    fn is_dynamic(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Param(_)))
    }

    fn matches(&self, path_segments: &[&str]) -> Option<HashMap<String, String>> {
        if self.segments.len() != path_segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (template, actual) in self.segments.iter().zip(path_segments) {
            match template {
                Segment::Literal(lit) => {
                    if lit != actual {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if actual.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), (*actual).to_string());
                }
            }
        }

        Some(params)
    }
}

/// A successful route lookup: the handler plus any dynamic-segment bindings.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub handler: &'a Handler,
    pub params: HashMap<String, String>,
}

/// The route registry: versioned path template → method → handler.
///
/// The version is fixed at construction and applied to every registered path
/// as a `/v{version}` prefix, so two servers at different versions never
/// collide even when given identical path strings.
///
/// All mutation happens through [`register`](Self::register) before serving
/// begins; [`lookup`](Self::lookup) takes `&self` and is safe to call from
/// any number of tasks concurrently.
#[derive(Debug)]
pub struct RouteTable {
    version: u32,
    routes: BTreeMap<String, RouteEntry>,
}

impl RouteTable {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            routes: BTreeMap::new(),
        }
    }

    /// The API version this table serves.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Registers `handler` for `method` under the versioned form of `path`.
    ///
    /// Fails with [`Error::DuplicateRoute`] when the method is already bound
    /// for that exact versioned path; the existing registration is left
    /// intact. The same path may carry several methods.
    pub fn register(&mut self, path: &str, method: Method, handler: Handler) -> Result<(), Error> {
        let key = self.versioned_path(path)?;
        let segments = parse_template(&key)?;

        let entry = self
            .routes
            .entry(key.clone())
            .or_insert_with(|| RouteEntry {
                segments,
                methods: HashMap::new(),
            });

        if entry.methods.contains_key(&method) {
            return Err(Error::DuplicateRoute { path: key, method });
        }
        entry.methods.insert(method, handler);

        Ok(())
    }

    /// Resolves a clean (query-stripped) path and method to a handler.
    ///
    /// An exact all-literal route wins over parameterized candidates; among
    /// parameterized routes the first match in template order is taken.
    pub fn lookup(&self, path: &str, method: Method) -> Option<RouteMatch<'_>> {
        // Fast path: literal registration, literal hit.
        if let Some(entry) = self.routes.get(path) {
            if !entry.is_dynamic() {
                if let Some(handler) = entry.methods.get(&method) {
                    return Some(RouteMatch {
                        handler,
                        params: HashMap::new(),
                    });
                }
            }
        }

        let path_segments: Vec<&str> = split_segments(path);
        for entry in self.routes.values() {
            if !entry.is_dynamic() {
                continue;
            }
            let Some(handler) = entry.methods.get(&method) else {
                continue;
            };
            if let Some(params) = entry.matches(&path_segments) {
                return Some(RouteMatch { handler, params });
            }
        }

        None
    }

    /// A snapshot of every committed registration:
    /// versioned path → method name → handler name.
    pub fn list_routes(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.routes
            .iter()
            .map(|(path, entry)| {
                let methods = entry
                    .methods
                    .iter()
                    .map(|(method, handler)| {
                        (method.as_str().to_string(), handler.name().to_string())
                    })
                    .collect();
                (path.clone(), methods)
            })
            .collect()
    }

    fn versioned_path(&self, path: &str) -> Result<String, Error> {
        if !path.starts_with('/') {
            return Err(Error::InvalidPath(path.to_string()));
        }
        Ok(format!("/v{}{}", self.version, path))
    }
}

fn split_segments(path: &str) -> Vec<&str> {
    // "/a/b" → ["a", "b"]; "/" → [""]. The leading empty segment produced
    // by the first slash is dropped, trailing slashes are significant.
    path.split('/').skip(1).collect()
}

fn parse_template(path: &str) -> Result<Vec<Segment>, Error> {
    split_segments(path)
        .into_iter()
        .map(|seg| {
            if let Some(name) = seg.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                if name.is_empty() || name.contains(['<', '>']) {
                    return Err(Error::InvalidPath(path.to_string()));
                }
                Ok(Segment::Param(name.to_string()))
            } else if seg.contains(['<', '>']) {
                Err(Error::InvalidPath(path.to_string()))
            } else {
                Ok(Segment::Literal(seg.to_string()))
            }
        })
        .collect()
}
