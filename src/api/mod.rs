pub mod colors;
pub mod images;
pub mod root;

pub use colors::{
    handle_get_color, handle_list_colors, handle_match_colors, MatchRequest, MatchResponse,
    __path_handle_get_color, __path_handle_list_colors, __path_handle_match_colors,
};
pub use images::{
    handle_extract, handle_upload, ExtractQuery, ExtractResponse, UploadResponse,
    __path_handle_extract, __path_handle_upload,
};
pub use root::{
    handle_health, handle_root, HealthResponse, RootResponse, __path_handle_health,
    __path_handle_root,
};
