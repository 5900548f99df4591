//! Static tool catalogue the agent orchestrator and the HTTP/MCP surfaces
//! both read from (C6).
//!
//! Each tool is declared once, here, as a `#[linkme::distributed_slice]`
//! entry into [`photolib_domain::registry::tools::TOOLS`]. [`StaticToolRegistry`]
//! is a thin [`ToolRegistryInterface`] wrapper over that slice so the
//! application layer doesn't need its own bespoke catalogue type.

use linkme::distributed_slice;
use photolib_domain::ports::services::tool_registry::{ParamLocation, ParamSpec, ParamType, ToolBinding, ToolDescriptor, ToolRegistryInterface};
use photolib_domain::registry::tools::{ToolEntry, TOOLS};

fn param(name: &str, param_type: ParamType, description: &str, required: bool, location: ParamLocation) -> ParamSpec {
    ParamSpec {
        name: name.to_owned(),
        param_type,
        description: description.to_owned(),
        required,
        location,
    }
}

#[distributed_slice(TOOLS)]
static SEMANTIC_SEARCH_IMAGES: ToolEntry = ToolEntry {
    name: "semantic_search_images",
    build: || ToolDescriptor {
        name: "semantic_search_images".to_owned(),
        description: "Finds photos whose embedding is closest to a text query, a reference image, or a weighted blend of both.".to_owned(),
        parameters: vec![
            param("query", ParamType::String, "Free-text description of what to find.", false, ParamLocation::Body),
            param("image_id", ParamType::String, "Reference image to search by similarity.", false, ParamLocation::Body),
            param("limit", ParamType::Integer, "Maximum number of results.", false, ParamLocation::Body),
        ],
        binding: Some(ToolBinding {
            method: "POST".to_owned(),
            path: "/search".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static SEARCH_BY_IMAGE_ID: ToolEntry = ToolEntry {
    name: "search_by_image_id",
    build: || ToolDescriptor {
        name: "search_by_image_id".to_owned(),
        description: "Finds photos visually similar to a specific already-indexed image.".to_owned(),
        parameters: vec![
            param("image_id", ParamType::String, "The reference image's id.", true, ParamLocation::Path),
            param("limit", ParamType::Integer, "Maximum number of results.", false, ParamLocation::Query),
        ],
        binding: Some(ToolBinding {
            method: "GET".to_owned(),
            path: "/images/{image_id}/similar".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static META_SEARCH_IMAGES: ToolEntry = ToolEntry {
    name: "meta_search_images",
    build: || ToolDescriptor {
        name: "meta_search_images".to_owned(),
        description: "Finds photos by structured metadata: an exact date, a recurring month/day, and/or tags.".to_owned(),
        parameters: vec![
            param("date", ParamType::String, "A date expression, e.g. '2024-05-01' or '5月1日'.", false, ParamLocation::Body),
            param("tags", ParamType::Array, "Tags the photo must carry.", false, ParamLocation::Body),
        ],
        binding: Some(ToolBinding {
            method: "POST".to_owned(),
            path: "/search/meta".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static META_SEARCH_HYBRID: ToolEntry = ToolEntry {
    name: "meta_search_hybrid",
    build: || ToolDescriptor {
        name: "meta_search_hybrid".to_owned(),
        description: "Combines a metadata filter (date/tags) with a semantic text query over the filtered set.".to_owned(),
        parameters: vec![
            param("query", ParamType::String, "Free-text description of what to find.", true, ParamLocation::Body),
            param("date", ParamType::String, "A date expression narrowing the candidate set.", false, ParamLocation::Body),
            param("tags", ParamType::Array, "Tags narrowing the candidate set.", false, ParamLocation::Body),
        ],
        binding: Some(ToolBinding {
            method: "POST".to_owned(),
            path: "/search/meta-hybrid".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static AGENT_EXECUTE_ACTION: ToolEntry = ToolEntry {
    name: "agent_execute_action",
    build: || ToolDescriptor {
        name: "agent_execute_action".to_owned(),
        description: "Directly executes one named action — search, upload (reserved), delete, update, or analyze — against the library, bypassing the conversational loop.".to_owned(),
        parameters: vec![
            param("action", ParamType::String, "One of `search`, `upload`, `delete`, `update`, `analyze`.", true, ParamLocation::Body),
            param("parameters", ParamType::Object, "Action-specific arguments, e.g. `image_id`/`image_ids`, `query`, `tags`, `description`.", true, ParamLocation::Body),
            param("context", ParamType::Object, "Optional ambient context, e.g. `session_id`.", false, ParamLocation::Body),
        ],
        binding: Some(ToolBinding {
            method: "POST".to_owned(),
            path: "/agent/action".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static GET_CURRENT_TIME: ToolEntry = ToolEntry {
    name: "get_current_time",
    build: || ToolDescriptor {
        name: "get_current_time".to_owned(),
        description: "Returns the current UTC time, for resolving relative date expressions like 'yesterday'.".to_owned(),
        parameters: Vec::new(),
        binding: Some(ToolBinding {
            method: "GET".to_owned(),
            path: "/time".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static GET_PHOTO_META_SCHEMA: ToolEntry = ToolEntry {
    name: "get_photo_meta_schema",
    build: || ToolDescriptor {
        name: "get_photo_meta_schema".to_owned(),
        description: "Returns the JSON Schema of a photo's metadata fields, so a caller can build a valid meta_search_images query.".to_owned(),
        parameters: Vec::new(),
        binding: Some(ToolBinding {
            method: "GET".to_owned(),
            path: "/schema/photo-meta".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static GENERATE_SOCIAL_MEDIA_CAPTION: ToolEntry = ToolEntry {
    name: "generate_social_media_caption",
    build: || ToolDescriptor {
        name: "generate_social_media_caption".to_owned(),
        description: "Generates a social-media-ready caption describing one or more photos.".to_owned(),
        parameters: vec![
            param("image_ids", ParamType::Array, "Photos to caption together.", true, ParamLocation::Body),
            param("style", ParamType::String, "Optional tone, e.g. 'playful' or 'minimal'.", false, ParamLocation::Body),
        ],
        binding: Some(ToolBinding {
            method: "POST".to_owned(),
            path: "/caption".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static RECOMMEND_IMAGES: ToolEntry = ToolEntry {
    name: "recommend_images",
    build: || ToolDescriptor {
        name: "recommend_images".to_owned(),
        description: "Scores a set of candidate photos (or the session's last search results) and recommends which to keep and which look redundant.".to_owned(),
        parameters: vec![
            param("session_id", ParamType::String, "Session whose last results should be scored, when images is omitted.", true, ParamLocation::Body),
            param("images", ParamType::Array, "Explicit candidate image ids, overriding the session's last results.", false, ParamLocation::Body),
        ],
        binding: Some(ToolBinding {
            method: "POST".to_owned(),
            path: "/recommend".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static EDIT_IMAGE: ToolEntry = ToolEntry {
    name: "edit_image",
    build: || ToolDescriptor {
        name: "edit_image".to_owned(),
        description: "Applies a natural-language edit instruction to a photo and returns the edited result.".to_owned(),
        parameters: vec![
            param("image_id", ParamType::String, "The photo to edit.", true, ParamLocation::Body),
            param("instruction", ParamType::String, "What to change, e.g. 'remove the person in the background'.", true, ParamLocation::Body),
        ],
        binding: Some(ToolBinding {
            method: "POST".to_owned(),
            path: "/edit".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static GENERATE_POINTCLOUD: ToolEntry = ToolEntry {
    name: "generate_pointcloud",
    build: || ToolDescriptor {
        name: "generate_pointcloud".to_owned(),
        description: "Starts an asynchronous 3D point-cloud reconstruction from a single photo; returns a task id to poll.".to_owned(),
        parameters: vec![
            param("image_id", ParamType::String, "Source photo.", true, ParamLocation::Body),
            param("quality", ParamType::String, "Reconstruction quality preset.", false, ParamLocation::Body),
        ],
        binding: Some(ToolBinding {
            method: "POST".to_owned(),
            path: "/pointcloud".to_owned(),
        }),
    },
};

#[distributed_slice(TOOLS)]
static KNOWLEDGE_QA: ToolEntry = ToolEntry {
    name: "knowledge_qa",
    build: || ToolDescriptor {
        name: "knowledge_qa".to_owned(),
        description: "Answers a free-form question about the library's contents by combining search results with a reasoning pass.".to_owned(),
        parameters: vec![param("question", ParamType::String, "The question to answer.", true, ParamLocation::Body)],
        binding: Some(ToolBinding {
            method: "POST".to_owned(),
            path: "/qa".to_owned(),
        }),
    },
};

/// [`ToolRegistryInterface`] over the `linkme`-collected [`TOOLS`] slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticToolRegistry;

impl StaticToolRegistry {
    /// Builds a registry reading from the process-wide tool slice.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ToolRegistryInterface for StaticToolRegistry {
    fn list(&self) -> Vec<ToolDescriptor> {
        photolib_domain::registry::tools::list_tools()
    }

    fn get(&self, name: &str) -> Option<ToolDescriptor> {
        photolib_domain::registry::tools::get_tool(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_required_tools() {
        let registry = StaticToolRegistry::new();
        let names: Vec<String> = registry.list().into_iter().map(|t| t.name).collect();
        for expected in [
            "semantic_search_images",
            "search_by_image_id",
            "meta_search_images",
            "meta_search_hybrid",
            "agent_execute_action",
            "get_current_time",
            "get_photo_meta_schema",
            "generate_social_media_caption",
            "recommend_images",
            "edit_image",
            "generate_pointcloud",
            "knowledge_qa",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing tool {expected}");
        }
    }

    #[test]
    fn get_returns_matching_descriptor() {
        let registry = StaticToolRegistry::new();
        let tool = registry.get("get_current_time").expect("registered");
        assert_eq!(tool.name, "get_current_time");
        assert!(registry.get("not_a_real_tool").is_none());
    }
}
