/// User intents produced by input mapping and consumed by `App::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleMode,
    StartQueryEdit,
    /// A character typed into the query box ('\x08' is the backspace sentinel).
    QueryInput(char),
    QueryCancel,
    QueryConfirm,
    Submit,
    ClearQuery,
    PrevItem,
    NextItem,
    ExportCsv,
    ToggleHelp,
    NavigateBack,
    Tick,
    Resize(u16, u16),
    None,
}
