//! Strong-typed UUID identifiers for all domain entities.

define_id!(ImageId, "Strong typed identifier for an indexed image");
define_id!(
    CollectionId,
    "Strong typed identifier for a vector store collection"
);
define_id!(SessionId, "Strong typed identifier for an agent session");
define_id!(ToolCallId, "Strong typed identifier for a tool call");
define_id!(
    PointCloudTaskId,
    "Strong typed identifier for a point-cloud generation task"
);
define_id!(
    OperationId,
    "Strong typed identifier for an indexing or reindexing operation"
);
define_id!(
    RecommendationId,
    "Strong typed identifier for a recommendation workflow run"
);
