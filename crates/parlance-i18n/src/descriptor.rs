//! Static display metadata for known locales

/// Display metadata for one locale code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleDescriptor {
    /// Normalized code, e.g. `fr_FR`
    pub code: &'static str,
    /// Name in the locale's own language
    pub name: &'static str,
    /// Name in English
    pub name_en: &'static str,
}

const fn entry(code: &'static str, name_en: &'static str, name: &'static str) -> LocaleDescriptor {
    LocaleDescriptor { code, name, name_en }
}

/// Known locales, sorted by code.
pub static LOCALE_NAMES: &[LocaleDescriptor] = &[
    entry("af_ZA", "Afrikaans", "Afrikaans"),
    entry("am_ET", "Amharic", "\u{12a0}\u{121b}\u{122d}\u{129b}"),
    entry("ar_AR", "Arabic", "\u{627}\u{644}\u{639}\u{631}\u{628}\u{64a}\u{629}"),
    entry("bg_BG", "Bulgarian", "\u{411}\u{44a}\u{43b}\u{433}\u{430}\u{440}\u{441}\u{43a}\u{438}"),
    entry("bn_IN", "Bengali", "\u{9ac}\u{9be}\u{982}\u{9b2}\u{9be}"),
    entry("bs_BA", "Bosnian", "Bosanski"),
    entry("ca_ES", "Catalan", "Catal\u{e0}"),
    entry("cs_CZ", "Czech", "\u{10c}e\u{161}tina"),
    entry("cy_GB", "Welsh", "Cymraeg"),
    entry("da_DK", "Danish", "Dansk"),
    entry("de_DE", "German", "Deutsch"),
    entry("el_GR", "Greek", "\u{395}\u{3bb}\u{3bb}\u{3b7}\u{3bd}\u{3b9}\u{3ba}\u{3ac}"),
    entry("en_GB", "English (UK)", "English (UK)"),
    entry("en_US", "English (US)", "English (US)"),
    entry("es_ES", "Spanish (Spain)", "Espa\u{f1}ol (Espa\u{f1}a)"),
    entry("es_LA", "Spanish", "Espa\u{f1}ol"),
    entry("et_EE", "Estonian", "Eesti"),
    entry("eu_ES", "Basque", "Euskara"),
    entry("fa_IR", "Persian", "\u{641}\u{627}\u{631}\u{633}\u{6cc}"),
    entry("fi_FI", "Finnish", "Suomi"),
    entry("fr_CA", "French (Canada)", "Fran\u{e7}ais (Canada)"),
    entry("fr_FR", "French", "Fran\u{e7}ais"),
    entry("ga_IE", "Irish", "Gaeilge"),
    entry("gl_ES", "Galician", "Galego"),
    entry("he_IL", "Hebrew", "\u{5e2}\u{5d1}\u{5e8}\u{5d9}\u{5ea}"),
    entry("hi_IN", "Hindi", "\u{939}\u{93f}\u{928}\u{94d}\u{926}\u{940}"),
    entry("hr_HR", "Croatian", "Hrvatski"),
    entry("hu_HU", "Hungarian", "Magyar"),
    entry("id_ID", "Indonesian", "Bahasa Indonesia"),
    entry("is_IS", "Icelandic", "\u{cd}slenska"),
    entry("it_IT", "Italian", "Italiano"),
    entry("ja_JP", "Japanese", "\u{65e5}\u{672c}\u{8a9e}"),
    entry("ko_KR", "Korean", "\u{d55c}\u{ad6d}\u{c5b4}"),
    entry("lt_LT", "Lithuanian", "Lietuvi\u{173}"),
    entry("lv_LV", "Latvian", "Latvie\u{161}u"),
    entry("mk_MK", "Macedonian", "\u{41c}\u{430}\u{43a}\u{435}\u{434}\u{43e}\u{43d}\u{441}\u{43a}\u{438}"),
    entry("ml_IN", "Malayalam", "\u{d2e}\u{d32}\u{d2f}\u{d3e}\u{d33}\u{d02}"),
    entry("ms_MY", "Malay", "Bahasa Melayu"),
    entry("nb_NO", "Norwegian (bokmal)", "Norsk (bokm\u{e5}l)"),
    entry("nl_NL", "Dutch", "Nederlands"),
    entry("nn_NO", "Norwegian (nynorsk)", "Norsk (nynorsk)"),
    entry("pa_IN", "Punjabi", "\u{a2a}\u{a70}\u{a1c}\u{a3e}\u{a2c}\u{a40}"),
    entry("pl_PL", "Polish", "Polski"),
    entry("pt_BR", "Portuguese (Brazil)", "Portugu\u{ea}s (Brasil)"),
    entry("pt_PT", "Portuguese (Portugal)", "Portugu\u{ea}s (Portugal)"),
    entry("ro_RO", "Romanian", "Rom\u{e2}n\u{103}"),
    entry("ru_RU", "Russian", "\u{420}\u{443}\u{441}\u{441}\u{43a}\u{438}\u{439}"),
    entry("sk_SK", "Slovak", "Sloven\u{10d}ina"),
    entry("sl_SI", "Slovenian", "Sloven\u{161}\u{10d}ina"),
    entry("sq_AL", "Albanian", "Shqip"),
    entry("sr_RS", "Serbian", "\u{421}\u{440}\u{43f}\u{441}\u{43a}\u{438}"),
    entry("sv_SE", "Swedish", "Svenska"),
    entry("sw_KE", "Swahili", "Kiswahili"),
    entry("ta_IN", "Tamil", "\u{ba4}\u{bae}\u{bbf}\u{bb4}\u{bcd}"),
    entry("te_IN", "Telugu", "\u{c24}\u{c46}\u{c32}\u{c41}\u{c17}\u{c41}"),
    entry("th_TH", "Thai", "\u{e20}\u{e32}\u{e29}\u{e32}\u{e44}\u{e17}\u{e22}"),
    entry("tl_PH", "Filipino", "Filipino"),
    entry("tr_TR", "Turkish", "T\u{fc}rk\u{e7}e"),
    entry("uk_UA", "Ukrainian", "\u{423}\u{43a}\u{440}\u{430}\u{457}\u{43d}\u{441}\u{44c}\u{43a}\u{430}"),
    entry("vi_VN", "Vietnamese", "Ti\u{1ebf}ng Vi\u{1ec7}t"),
    entry("zh_CN", "Chinese (Simplified)", "\u{4e2d}\u{6587}(\u{7b80}\u{4f53})"),
    entry("zh_TW", "Chinese (Traditional)", "\u{4e2d}\u{6587}(\u{7e41}\u{9ad4})"),
];

/// Looks up the descriptor for a normalized code.
pub fn descriptor(code: &str) -> Option<&'static LocaleDescriptor> {
    LOCALE_NAMES
        .binary_search_by(|entry| entry.code.cmp(code))
        .ok()
        .map(|index| &LOCALE_NAMES[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        assert!(LOCALE_NAMES.windows(2).all(|pair| pair[0].code < pair[1].code));
    }

    #[test]
    fn test_non_ascii_name() {
        let name = descriptor("es_LA").unwrap().name;
        assert_eq!(name, "Espa\u{f1}ol");
        assert_eq!(name.as_bytes(), b"Espa\xc3\xb1ol");
    }

    #[test]
    fn test_unknown_code() {
        assert!(descriptor("xx_XX").is_none());
        assert!(descriptor("fr").is_none());
    }
}
