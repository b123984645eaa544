/// Public Buzzheavier endpoint.
pub const DEFAULT_BASE_URL: &str = "https://buzzheavier.com";

/// Size of one upload part: 5 GiB. The final part of a file may be shorter.
///
/// The server sizes the `uploadUrls` list of a session with this value, so
/// it is not configurable.
pub const CHUNK_SIZE: u64 = 5 * 1024 * 1024 * 1024;

/// Substring the folder endpoint returns when the name is already taken.
pub const FOLDER_CONFLICT_MARKER: &str = "Folder with same name already exist";

/// Path of the folder (directory) endpoint, relative to the base URL.
pub const FOLDER_PATH: &str = "/d/";

/// Path of the file session endpoint, relative to the base URL.
pub const FILE_PATH: &str = "/f/";

/// Multipart form field carrying the folder name.
pub const FOLDER_NAME_FIELD: &str = "name";

/// Query parameter naming the target folder on completion.
pub const DIRECTORY_ID_PARAM: &str = "directoryId";

// htmx headers the folder endpoint expects from the web UI.
pub const HX_CURRENT_URL: &str = "hx-current-url";
pub const HX_REQUEST: &str = "hx-request";
pub const HX_TARGET: &str = "hx-target";
pub const HX_TRIGGER: &str = "hx-trigger";
pub const HX_TARGET_VALUE: &str = "tbody";
pub const HX_TRIGGER_CREATE_DIRECTORY: &str = "create-directory-btn";
