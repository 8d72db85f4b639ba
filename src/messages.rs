//! Fixed user-facing texts.
//!
//! One message per failure reason plus the acknowledgment and the /start
//! greeting. The product speaks Russian; the texts here are the only UI
//! strings in the crate, so every reply a user can see lives in this file.

/// Reply to /start and /help, lists the accepted formats.
pub const GREETING: &str = "\u{1F44B} <b>AI CheckMate</b> — проверяю договоры на риски.\n\
<i>Просто отправь PDF, DOCX или фото — и я выделю опасные места и объясню человеческим языком.</i>";

/// Sent immediately after a file event is accepted, before any processing.
pub const MSG_ACK: &str = "\u{1F4E5} Получил файл, анализирую… \u{23F3}";

pub const MSG_UNSUPPORTED_FORMAT: &str = "\u{274C} Не могу обработать этот тип файла.";

pub const MSG_EXTRACTION_FAILED: &str =
    "\u{26A0}\u{FE0F} Не удалось извлечь текст из файла. Попробуйте другой формат.";

pub const MSG_CONTENT_TOO_SPARSE: &str =
    "\u{26A0}\u{FE0F} Документ почти пустой или текст не распознан.";

pub const MSG_ANALYSIS_FAILED: &str =
    "\u{26A0}\u{FE0F} Не удалось проанализировать документ. Попробуйте позже.";

/// System instruction for the analysis service: the model acts as a legal
/// risk reviewer and owns the output formatting end to end.
pub const SYSTEM_PROMPT: &str = "Ты — виртуальный юрист-ассистент. Проанализируй текст договора, найди потенциальные \
риски и двусмысленные формулировки. Для каждого риска сформируй: (1) короткое название, \
(2) цитату из договора, (3) почему опасно простыми словами, (4) совет, как исправить. \
Заверши списком коротких пунктов-чек-листа, что проверить перед подписанием.";
