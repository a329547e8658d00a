//! MCP server exposing a built documentation graph.

use crate::engine::DocsEngine;
use crate::tools::{
    InspectNodeRequest, ListPackagesRequest, ResolveReferenceRequest, SearchRequest, handle_inspect_node,
    handle_list_packages, handle_resolve_reference, handle_search,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for documentation graph queries
#[derive(Clone)]
pub struct DocServer {
    /// Built, immutable documentation graph
    engine: DocsEngine,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocServer")
            .field("packages", &self.engine.collection().packages().len())
            .field("home_package", &self.engine.home_package())
            .finish()
    }
}

#[tool_router]
impl DocServer {
    pub fn new(engine: DocsEngine) -> Self {
        Self {
            engine,
            tool_router: Self::tool_router(),
        }
    }

    pub fn engine(&self) -> &DocsEngine {
        &self.engine
    }

    #[tool(
        description = "List documented packages in manifest order with versions, node counts and the home package. Optionally explains packages that were skipped during the build.",
        input_schema = inline_schema_for_type::<ListPackagesRequest>()
    )]
    async fn list_packages(
        &self,
        Parameters(request): Parameters<ListPackagesRequest>,
    ) -> std::result::Result<String, String> {
        Ok(handle_list_packages(&self.engine, &request))
    }

    #[tool(
        description = "Search declarations by name across all packages or within one. Exact name matches rank first, then qualified-name and word matches. Re-exported symbols appear once, under the package that declares them.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search(&self, Parameters(request): Parameters<SearchRequest>) -> std::result::Result<String, String> {
        handle_search(&self.engine, &request)
    }

    #[tool(
        description = "Inspect one declaration by slug (e.g. 'client.send') or qualified name (e.g. 'Client.send'). Shows signatures, type, documentation, flags, inheritance and grouped members.",
        input_schema = inline_schema_for_type::<InspectNodeRequest>()
    )]
    async fn inspect_node(
        &self,
        Parameters(request): Parameters<InspectNodeRequest>,
    ) -> std::result::Result<String, String> {
        handle_inspect_node(&self.engine, &request)
    }

    #[tool(
        description = "Resolve a symbol reference as written in a package to its declaring node, an external URL, or unresolved. Follows re-export aliases across packages.",
        input_schema = inline_schema_for_type::<ResolveReferenceRequest>()
    )]
    async fn resolve_reference(
        &self,
        Parameters(request): Parameters<ResolveReferenceRequest>,
    ) -> std::result::Result<String, String> {
        handle_resolve_reference(&self.engine, &request)
    }
}

#[tool_handler]
impl ServerHandler for DocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "docgraph: Documentation graph for a multi-package TypeScript project. \
                 Start with list_packages, find symbols with search, then use inspect_node \
                 with the returned slug. resolve_reference explains where a type name links to.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this sets `inline_subschemas = true` so
/// enums are emitted inline instead of as `$ref` definitions.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let schema = settings.into_generator().into_root_schema_for::<T>();
    let json_object = match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(object)) => object,
        Ok(_) | Err(_) => {
            tracing::error!("Schema for {} did not serialize to an object", std::any::type_name::<T>());
            JsonObject::new()
        }
    };

    Arc::new(json_object)
}
