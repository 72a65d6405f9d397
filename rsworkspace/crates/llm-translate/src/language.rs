//! Language code → English name, for natural-language prompts.

/// English name for a DeepL-style target code (`EN`, `pt-br`, ...).
///
/// Unknown codes come back unchanged so the prompt still names them.
pub fn language_name(code: &str) -> String {
    let upper = code.trim().to_ascii_uppercase();
    let name = match upper.as_str() {
        "AR" => "Arabic",
        "BG" => "Bulgarian",
        "CS" => "Czech",
        "DA" => "Danish",
        "DE" => "German",
        "EL" => "Greek",
        "EN" => "English",
        "EN-GB" => "British English",
        "EN-US" => "American English",
        "ES" => "Spanish",
        "ET" => "Estonian",
        "FI" => "Finnish",
        "FR" => "French",
        "HU" => "Hungarian",
        "ID" => "Indonesian",
        "IT" => "Italian",
        "JA" => "Japanese",
        "KO" => "Korean",
        "LT" => "Lithuanian",
        "LV" => "Latvian",
        "NB" => "Norwegian Bokmål",
        "NL" => "Dutch",
        "PL" => "Polish",
        "PT" => "Portuguese",
        "PT-BR" => "Brazilian Portuguese",
        "PT-PT" => "European Portuguese",
        "RO" => "Romanian",
        "RU" => "Russian",
        "SK" => "Slovak",
        "SL" => "Slovenian",
        "SV" => "Swedish",
        "TR" => "Turkish",
        "UK" => "Ukrainian",
        "ZH" => "Chinese",
        _ => return code.trim().to_string(),
    };
    name.to_string()
}
