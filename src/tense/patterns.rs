//! Lexicon and ordered suffix patterns for POS tagging.
//!
//! Tagging a token is a two-level lookup:
//! 1. Exact match in the closed-class and verb lexicon
//! 2. Ordered regex patterns over word shape and suffix, first match wins
//!
//! Both tables are built once via LazyLock.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::types::PosTag;

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "another", "either", "neither", "such", "its", "our", "their", "his", "her",
    "my", "your",
];

const RELATIVES: &[&str] = &[
    "which", "who", "whom", "whose", "wherein", "whereby", "whereupon", "what",
];

const MODALS: &[&str] = &[
    "will", "shall", "would", "should", "can", "could", "may", "might", "must", "cannot",
    "won't", "can't",
];

const PRONOUNS: &[&str] = &[
    "i", "we", "you", "they", "he", "she", "it", "them", "us", "him", "me", "one",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "over", "under",
    "between", "through", "during", "after", "before", "above", "below", "about", "against",
    "among", "within", "without", "until", "via", "per", "upon", "than", "as", "if", "while",
    "since", "because", "whereas", "across", "along", "around", "beyond", "toward", "towards",
    "throughout", "except", "unless", "whether", "like", "near", "up", "down", "out", "off",
];

const ADVERBS: &[&str] = &[
    "not", "n't", "also", "then", "further", "thus", "therefore", "hence", "again", "very",
    "here", "there", "thereafter", "thereby", "still", "already", "only", "even", "just",
    "overnight", "often", "never", "always", "now", "once", "too", "so", "well", "rather",
    "however", "first", "next", "later", "instead", "indeed",
];

const BE_FORMS: &[(&str, PosTag)] = &[
    ("is", PosTag::Vbz),
    ("are", PosTag::Vbp),
    ("am", PosTag::Vbp),
    ("was", PosTag::Vbd),
    ("were", PosTag::Vbd),
    ("be", PosTag::Vb),
    ("been", PosTag::Vbn),
    ("being", PosTag::Vbg),
    ("isn't", PosTag::Vbz),
    ("aren't", PosTag::Vbp),
    ("wasn't", PosTag::Vbd),
    ("weren't", PosTag::Vbd),
];

const HAVE_FORMS: &[(&str, PosTag)] = &[
    ("has", PosTag::Vbz),
    ("have", PosTag::Vbp),
    ("had", PosTag::Vbd),
    ("having", PosTag::Vbg),
    ("hasn't", PosTag::Vbz),
    ("haven't", PosTag::Vbp),
    ("hadn't", PosTag::Vbd),
];

const DO_FORMS: &[(&str, PosTag)] = &[
    ("does", PosTag::Vbz),
    ("do", PosTag::Vbp),
    ("did", PosTag::Vbd),
    ("done", PosTag::Vbn),
    ("doing", PosTag::Vbg),
    ("doesn't", PosTag::Vbz),
    ("don't", PosTag::Vbp),
    ("didn't", PosTag::Vbd),
];

/// Past forms that are never participles.
const IRREGULAR_PAST: &[&str] = &[
    "took", "gave", "became", "began", "came", "grew", "ran", "rose", "saw", "went", "wrote",
    "drove", "fell", "froze", "broke", "chose", "drew", "ate", "knew", "threw", "shook",
    "forgot", "spoke", "swam", "sank", "shrank", "arose", "underwent", "withdrew", "overcame",
];

/// Participles that are never simple past.
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "taken", "given", "begun", "grown", "risen", "seen", "gone", "written", "driven", "fallen",
    "frozen", "broken", "chosen", "drawn", "eaten", "known", "thrown", "shaken", "forgotten",
    "spoken", "shown", "proven", "sunk", "shrunk", "arisen", "undergone", "withdrawn",
    "mistaken",
];

/// Irregular forms shared by simple past and past participle. Resolved by
/// context like regular "-ed" forms.
const SHARED_PAST_FORMS: &[&str] = &[
    "made", "found", "held", "kept", "left", "lost", "brought", "bought", "led", "met", "paid",
    "sold", "told", "thought", "spent", "built", "sent", "fed", "bound", "ground", "wound",
    "stood", "understood", "taught", "caught", "sought", "laid", "said", "dug", "hung", "spun",
    "struck", "stuck", "got", "sat", "slid", "dealt", "felt", "meant", "lent", "heard",
];

/// Base verbs common in experimental write-ups. Their third person singular
/// forms are generated.
const BASE_VERBS: &[&str] = &[
    "add", "apply", "comprise", "contain", "include", "provide", "produce", "prepare", "form",
    "obtain", "use", "mix", "heat", "cool", "stir", "dissolve", "filter", "wash", "dry", "show",
    "exhibit", "demonstrate", "measure", "determine", "react", "yield", "give", "take", "make",
    "allow", "remove", "place", "perform", "conduct", "test", "treat", "inject", "administer",
    "evaluate", "observe", "increase", "decrease", "reduce", "improve", "result", "cause",
    "require", "remain", "become", "appear", "seem", "indicate", "suggest", "represent",
    "correspond", "describe", "illustrate", "compare", "repeat", "follow", "purify", "separate",
    "isolate", "combine", "synthesize", "concentrate", "evaporate", "extract", "dilute",
    "incubate", "centrifuge", "collect", "transfer", "store", "maintain", "operate", "run",
    "carry", "coat", "grow", "cut", "set", "put", "spread", "keep", "hold", "find", "get", "see",
    "know", "go", "come", "begin", "bring", "lead", "pay", "send", "build", "feed", "bind",
    "grind", "wind", "stand", "tell", "think", "spend", "leave", "lose", "buy", "sell", "meet",
    "lay", "say", "dig", "hang", "spin", "strike", "stick", "sit", "adjust", "analyze",
    "analyse", "assay", "calculate", "check", "cleave", "confirm", "convert", "crystallize",
    "detect", "develop", "digest", "distill", "elute", "enhance", "ensure", "exceed", "expose",
    "express", "fill", "formulate", "freeze", "identify", "immerse", "incorporate", "inhibit",
    "insert", "irradiate", "load", "lyophilize", "melt", "modify", "monitor", "mount", "occur",
    "polymerize", "pour", "precipitate", "quench", "raise", "receive", "recover",
    "recrystallize", "reflux", "reach", "record", "release", "replace", "rinse", "rotate",
    "seal", "select", "shake", "sonicate", "sterilize", "stop", "suspend", "swell", "titrate",
    "transform", "transfect", "vary", "weigh", "achieve", "affect", "change", "consider",
    "continue", "create", "enable", "establish", "expect", "explain", "help", "involve",
    "look", "move", "need", "offer", "open", "pass", "prove", "refer", "relate", "return",
    "serve", "start", "supply", "tend", "try", "turn", "want", "exist", "differ", "depend",
    "consist", "lack", "possess", "undergo", "withdraw", "overcome", "reveal", "support",
];

/// Words the suffix patterns would misread as verbs or adverbs.
const NOUN_EXCEPTIONS: &[&str] = &[
    "thing", "nothing", "something", "anything", "everything", "string", "spring", "ring",
    "king", "wing", "morning", "evening", "ceiling", "bed", "red", "seed", "speed", "hundred",
    "shed", "weed", "reed", "sled", "fly", "family", "assembly", "jelly",
    "belly", "rally", "sting", "swing", "sling", "cling", "fling",
];

/// Add the third person singular suffix to a base verb.
pub(super) fn third_person_singular(base: &str) -> String {
    let bytes = base.as_bytes();
    let ends_with_consonant_y = base.len() > 1
        && base.ends_with('y')
        && !matches!(bytes[bytes.len() - 2], b'a' | b'e' | b'i' | b'o' | b'u');

    if ends_with_consonant_y {
        format!("{}ies", &base[..base.len() - 1])
    } else if ["s", "sh", "ch", "x", "z", "o"]
        .iter()
        .any(|suffix| base.ends_with(suffix))
    {
        format!("{base}es")
    } else {
        format!("{base}s")
    }
}

/// Exact-match lexicon keyed by lowercased word.
pub(super) static LEXICON: LazyLock<HashMap<String, PosTag>> = LazyLock::new(|| {
    let mut lexicon = HashMap::with_capacity(1024);

    for verb in BASE_VERBS {
        lexicon.insert(verb.to_string(), PosTag::Vb);
        lexicon.insert(third_person_singular(verb), PosTag::Vbz);
    }
    for word in IRREGULAR_PAST.iter().chain(SHARED_PAST_FORMS) {
        lexicon.insert(word.to_string(), PosTag::Vbd);
    }
    for word in IRREGULAR_PARTICIPLES {
        lexicon.insert(word.to_string(), PosTag::Vbn);
    }

    let closed_classes: [(&[&str], PosTag); 7] = [
        (DETERMINERS, PosTag::Dt),
        (RELATIVES, PosTag::Wdt),
        (MODALS, PosTag::Md),
        (PRONOUNS, PosTag::Prp),
        (CONJUNCTIONS, PosTag::Cc),
        (PREPOSITIONS, PosTag::In),
        (ADVERBS, PosTag::Rb),
    ];
    for (words, tag) in closed_classes {
        for word in words {
            lexicon.insert(word.to_string(), tag);
        }
    }
    lexicon.insert("to".to_string(), PosTag::To);

    for (word, tag) in BE_FORMS.iter().chain(HAVE_FORMS).chain(DO_FORMS) {
        lexicon.insert(word.to_string(), *tag);
    }
    for word in NOUN_EXCEPTIONS {
        lexicon.insert(word.to_string(), PosTag::Nn);
    }

    lexicon
});

static SHARED_PAST: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SHARED_PAST_FORMS.iter().copied().collect());

/// Whether a lowercased VBD token could also be a past participle.
pub(super) fn is_ambiguous_past(lower: &str) -> bool {
    lower.ends_with("ed") || SHARED_PAST.contains(lower)
}

/// Whether a lowercased token is a generated or listed third person form
/// rather than an auxiliary.
pub(super) fn is_lexical_third_person(lower: &str) -> bool {
    !matches!(lower, "is" | "has" | "does" | "isn't" | "hasn't" | "doesn't")
}

struct PatternEntry {
    regex: Regex,
    tag: PosTag,
}

/// Shape and suffix patterns, in order. First match wins.
pub(super) struct CompiledPatterns {
    patterns: Vec<PatternEntry>,
}

impl CompiledPatterns {
    /// Returns `PosTag::Nn` if no pattern matches (catch-all).
    pub(super) fn match_token(&self, value: &str) -> PosTag {
        self.patterns
            .iter()
            .find(|entry| entry.regex.is_match(value))
            .map_or(PosTag::Nn, |entry| entry.tag)
    }
}

pub(super) static COMPILED_PATTERNS: LazyLock<CompiledPatterns> = LazyLock::new(|| {
    let patterns = build_pattern_list()
        .into_iter()
        .map(|(regex_str, tag)| PatternEntry {
            regex: Regex::new(regex_str)
                .unwrap_or_else(|e| panic!("Failed to compile regex '{}': {}", regex_str, e)),
            tag,
        })
        .collect();
    CompiledPatterns { patterns }
});

fn build_pattern_list() -> Vec<(&'static str, PosTag)> {
    vec![
        // Punctuation and symbols
        (r"^[^\p{L}\p{N}]+$", PosTag::Sym),
        // Numbers, including "1.5", "10,000" and "2a"
        (r"^\p{N}", PosTag::Cd),
        // Gerunds: at least two letters before the suffix
        (r"(?i)^\p{L}[\p{L}-]+ing$", PosTag::Vbg),
        // Regular past: at least two letters before the suffix
        (r"(?i)^\p{L}[\p{L}-]+ed$", PosTag::Vbd),
        // Nominal suffixes, plural before singular
        (
            r"(?i)^[\p{L}-]+(nesses|ments|tions|sions|ities|ances|ences|ures|isms|ships)$",
            PosTag::Nns,
        ),
        (
            r"(?i)^[\p{L}-]+(ness|ment|tion|sion|ity|ance|ence|ure|ism|ship|ogy)$",
            PosTag::Nn,
        ),
        // Adjectival suffixes
        (
            r"(?i)^[\p{L}-]+(ous|ful|ive|able|ible|ical|less|ary|ic|al)$",
            PosTag::Jj,
        ),
        // Adverbs
        (r"(?i)^[\p{L}-]{2,}ly$", PosTag::Rb),
        // Abbreviations and formulas: "DMSO", "NaCl", "H2O"
        (r"^\p{Lu}[\p{L}\p{N}-]*[\p{Lu}\p{N}][\p{L}\p{N}-]*$", PosTag::Nnp),
        // Plurals, but not "-ss" or "-us"
        (r"(?i)^[\p{L}-]+[^su\W]s$", PosTag::Nns),
    ]
}
