use crate::ir::HttpMethod;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::server::Server;
use crate::parse::spec::{Info, OpenApiSpec};

/// One HTTP method on one path, with the path item it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct RawOperation<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
    pub path_item: &'a PathItem,
}

/// Read-only view over a resolved spec exposing the three server levels and
/// the operations in generation order.
#[derive(Debug, Clone, Copy)]
pub struct SpecModel<'a> {
    spec: &'a OpenApiSpec,
}

impl<'a> SpecModel<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self { spec }
    }

    pub fn info(&self) -> &'a Info {
        &self.spec.info
    }

    pub fn root_servers(&self) -> &'a [Server] {
        &self.spec.servers
    }

    /// Paths in document order.
    pub fn path_items(&self) -> impl Iterator<Item = (&'a str, &'a PathItem)> + use<'a> {
        self.spec
            .paths
            .iter()
            .map(|(path, item)| (path.as_str(), item))
    }

    /// Operation-level server lists of a path item, in method priority order.
    /// Methods without an operation are skipped.
    pub fn operation_servers(
        item: &'a PathItem,
    ) -> impl Iterator<Item = (HttpMethod, &'a [Server])> + use<'a> {
        HttpMethod::ALL.into_iter().filter_map(move |method| {
            item.operation(method)
                .map(|op| (method, op.servers.as_slice()))
        })
    }

    /// Every (path, method, operation) triple, paths in document order and
    /// methods in [`HttpMethod::ALL`] order within a path.
    pub fn operations(&self) -> impl Iterator<Item = RawOperation<'a>> + use<'a> {
        self.path_items().flat_map(|(path, path_item)| {
            HttpMethod::ALL.into_iter().filter_map(move |method| {
                path_item.operation(method).map(|operation| RawOperation {
                    path,
                    method,
                    operation,
                    path_item,
                })
            })
        })
    }
}
