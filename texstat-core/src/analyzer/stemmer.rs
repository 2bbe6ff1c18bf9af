//! Stemmers.
//!
//! Two algorithms sit behind the [`Stemmer`] trait:
//!
//! - [`SnowballStemmer`], backed by `rust-stemmers`, for every supported
//!   [`Language`]
//! - [`RslpStemmer`], the Removal Suffix Stemmer for Portuguese by Orengo
//!   and Huyck, as a table of suffix rules in eight steps
//!
//! Both map a lowercase token to its stem and never fail. The empty string
//! stems to itself.

use std::borrow::Cow;
use std::fmt;

use rust_stemmers::Algorithm;
use texstat_types::{ConfigError, Language, StemmerKind};

/// Maps a token to its stem.
pub trait Stemmer: Send + Sync {
    /// Returns the stem of a lowercase token.
    fn stem<'w>(&self, word: &'w str) -> Cow<'w, str>;

    /// Algorithm name, for logs and reports.
    fn name(&self) -> &'static str;
}

/// Builds the stemmer named by the configuration.
///
/// RSLP only has rules for Portuguese.
pub fn build(kind: StemmerKind, language: Language) -> Result<Box<dyn Stemmer>, ConfigError> {
    match kind {
        StemmerKind::Snowball => Ok(Box::new(SnowballStemmer::new(language))),
        StemmerKind::Rslp if language == Language::Portuguese => Ok(Box::new(RslpStemmer)),
        StemmerKind::Rslp => Err(ConfigError::UnsupportedLanguage {
            component: "RSLP stemmer",
            language,
        }),
    }
}

/// Snowball stemmer for one language.
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
    algorithm: Algorithm,
}

impl Clone for SnowballStemmer {
    fn clone(&self) -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(self.algorithm),
            algorithm: self.algorithm,
        }
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl SnowballStemmer {
    /// Creates a Snowball stemmer for `language`.
    pub fn new(language: Language) -> Self {
        let algorithm = match language {
            Language::Portuguese => Algorithm::Portuguese,
            Language::English => Algorithm::English,
            Language::Spanish => Algorithm::Spanish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Italian => Algorithm::Italian,
        };
        Self {
            inner: rust_stemmers::Stemmer::create(algorithm),
            algorithm,
        }
    }
}

impl Stemmer for SnowballStemmer {
    #[inline]
    fn stem<'w>(&self, word: &'w str) -> Cow<'w, str> {
        self.inner.stem(word)
    }

    fn name(&self) -> &'static str {
        "snowball"
    }
}

/// One suffix rule: strip `suffix`, append `replacement`, but only if at
/// least `min_stem` characters would remain and the word is not listed in
/// `exceptions`.
struct Rule {
    suffix: &'static str,
    min_stem: usize,
    replacement: &'static str,
    exceptions: &'static [&'static str],
}

const fn rule(suffix: &'static str, min_stem: usize, replacement: &'static str) -> Rule {
    Rule {
        suffix,
        min_stem,
        replacement,
        exceptions: &[],
    }
}

const fn rule_except(
    suffix: &'static str,
    min_stem: usize,
    replacement: &'static str,
    exceptions: &'static [&'static str],
) -> Rule {
    Rule {
        suffix,
        min_stem,
        replacement,
        exceptions,
    }
}

/// Applies the first matching rule of a step. Returns true if one fired.
fn apply_step(word: &mut String, rules: &[Rule]) -> bool {
    let len = word.chars().count();
    for rule in rules {
        if !word.ends_with(rule.suffix) {
            continue;
        }
        if len < rule.suffix.chars().count() + rule.min_stem {
            continue;
        }
        if rule.exceptions.contains(&word.as_str()) {
            continue;
        }
        let cut = word.len() - rule.suffix.len();
        word.truncate(cut);
        word.push_str(rule.replacement);
        return true;
    }
    false
}

/// Removal Suffix Stemmer for Portuguese.
///
/// Steps run in order: plural (words ending in `s`), feminine (words ending
/// in `a` or `ã`), augmentative, adverb, noun, then verb if no noun suffix
/// matched, then vowel if neither matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RslpStemmer;

impl Stemmer for RslpStemmer {
    fn stem<'w>(&self, word: &'w str) -> Cow<'w, str> {
        if word.is_empty() {
            return Cow::Borrowed(word);
        }
        let mut stem = word.to_owned();
        if stem.ends_with('s') {
            apply_step(&mut stem, PLURAL);
        }
        if stem.ends_with('a') || stem.ends_with('ã') {
            apply_step(&mut stem, FEMININE);
        }
        apply_step(&mut stem, AUGMENTATIVE);
        apply_step(&mut stem, ADVERB);
        if !apply_step(&mut stem, NOUN) && !apply_step(&mut stem, VERB) {
            apply_step(&mut stem, VOWEL);
        }
        if stem == word {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(stem)
        }
    }

    fn name(&self) -> &'static str {
        "rslp"
    }
}

static PLURAL: &[Rule] = &[
    rule("ns", 1, "m"),
    rule("ões", 3, "ão"),
    rule_except("ães", 1, "ão", &["mães"]),
    rule_except("ais", 1, "al", &["cais", "mais"]),
    rule("éis", 2, "el"),
    rule("eis", 2, "el"),
    rule("óis", 2, "ol"),
    rule_except(
        "is",
        2,
        "il",
        &["lápis", "cais", "mais", "crúcis", "biquínis", "pois", "depois", "dois", "leis"],
    ),
    rule("les", 3, "l"),
    rule_except("res", 3, "r", &["árvores"]),
    rule_except(
        "s",
        2,
        "",
        &[
            "aliás", "pires", "lápis", "cais", "mais", "mas", "menos", "férias", "fezes",
            "pêsames", "crúcis", "gás", "atrás", "moisés", "através", "convés", "ês", "país",
            "após", "ambas", "ambos", "messias", "depois",
        ],
    ),
];

static FEMININE: &[Rule] = &[
    rule_except(
        "ona",
        3,
        "ão",
        &[
            "abandona", "lona", "iona", "cortisona", "monótona", "maratona", "acetona",
            "detona", "carona",
        ],
    ),
    rule("ora", 3, "or"),
    rule_except(
        "na",
        4,
        "no",
        &[
            "carona", "abandona", "lona", "iona", "cortisona", "monótona", "maratona",
            "acetona", "detona", "guiana", "campana", "grana", "caravana", "banana", "paisana",
        ],
    ),
    rule_except("inha", 3, "inho", &["rainha", "linha", "minha"]),
    rule_except(
        "esa",
        3,
        "ês",
        &["mesa", "obesa", "princesa", "turquesa", "ilesa", "pesa", "presa"],
    ),
    rule_except("osa", 3, "oso", &["mucosa", "prosa"]),
    rule("íaca", 3, "íaco"),
    rule_except("ica", 3, "ico", &["dica"]),
    rule_except("ada", 2, "ado", &["pitada"]),
    rule_except("ida", 3, "ido", &["vida"]),
    rule_except("ída", 3, "ido", &["recaída", "saída", "dúvida"]),
    rule_except("ima", 3, "imo", &["vítima"]),
    rule_except("iva", 3, "ivo", &["saliva", "oliva"]),
    rule_except(
        "eira",
        3,
        "eiro",
        &[
            "beira", "cadeira", "frigideira", "bandeira", "feira", "capoeira", "barreira",
            "fronteira", "besteira", "poeira",
        ],
    ),
    rule_except("ã", 2, "ão", &["amanhã", "arapuã", "fã", "divã"]),
];

static AUGMENTATIVE: &[Rule] = &[
    rule("díssimo", 5, ""),
    rule("abilíssimo", 5, ""),
    rule("íssimo", 3, ""),
    rule("ésimo", 3, ""),
    rule("érrimo", 4, ""),
    rule("zinho", 2, ""),
    rule("quinho", 4, "c"),
    rule("uinho", 4, ""),
    rule("adinho", 3, ""),
    rule_except("inho", 3, "", &["caminho", "cominho"]),
    rule("alhão", 4, ""),
    rule("uça", 4, ""),
    rule_except("aço", 4, "", &["antebraço"]),
    rule("aça", 4, ""),
    rule("adão", 4, ""),
    rule("idão", 4, ""),
    rule_except("ázio", 3, "", &["topázio"]),
    rule("arraz", 4, ""),
    rule("zarrão", 3, ""),
    rule("arrão", 4, ""),
    rule_except("zão", 2, "", &["coalizão"]),
    rule_except(
        "ão",
        3,
        "",
        &[
            "camarão", "chimarrão", "canção", "coração", "embrião", "grotão", "glutão",
            "ficção", "fogão", "feição", "furacão", "gamão", "lampião", "leão", "macacão",
            "nação", "órfão", "orgão", "patrão", "portão", "quinhão", "rincão", "tração",
            "falcão", "espião", "mamão", "folião", "cordão", "aptidão", "campeão", "colchão",
            "limão", "leilão", "melão", "barão", "milhão", "bilhão", "fusão", "cristão",
            "ilusão", "capitão", "estação", "senão",
        ],
    ),
];

static ADVERB: &[Rule] = &[rule_except("mente", 4, "", &["experimente"])];

static NOUN: &[Rule] = &[
    rule("encialista", 4, ""),
    rule("alista", 5, ""),
    rule_except("agem", 3, "", &["coragem", "chantagem", "vantagem", "carruagem"]),
    rule("iamento", 4, ""),
    rule_except("amento", 3, "", &["firmamento", "fundamento", "departamento"]),
    rule("imento", 3, ""),
    rule_except(
        "mento",
        6,
        "",
        &["firmamento", "elemento", "complemento", "instrumento", "departamento"],
    ),
    rule("alizado", 4, ""),
    rule("atizado", 4, ""),
    rule_except("tizado", 4, "", &["alfabetizado"]),
    rule_except("izado", 5, "", &["organizado", "pulverizado"]),
    rule_except("ativo", 4, "", &["pejorativo", "relativo"]),
    rule_except("tivo", 4, "", &["relativo"]),
    rule_except("ivo", 4, "", &["passivo", "possessivo", "pejorativo", "positivo"]),
    rule_except("ado", 2, "", &["grado"]),
    rule_except(
        "ido",
        3,
        "",
        &["cândido", "consolidado", "rápido", "decido", "tímido", "duvidado", "marido"],
    ),
    rule("ador", 3, ""),
    rule("edor", 3, ""),
    rule_except("idor", 4, "", &["ouvidor"]),
    rule_except("dor", 4, "", &["ouvidor"]),
    rule_except("sor", 4, "", &["assessor"]),
    rule("atoria", 5, ""),
    rule_except(
        "tor",
        3,
        "",
        &["benfeitor", "leitor", "editor", "pastor", "produtor", "promotor", "consultor"],
    ),
    rule_except(
        "ário",
        3,
        "",
        &["voluntário", "salário", "aniversário", "diário", "lionário", "armário"],
    ),
    rule("atório", 3, ""),
    rule_except(
        "rio",
        5,
        "",
        &[
            "voluntário", "salário", "aniversário", "diário", "compulsório", "lionário",
            "próprio", "stério", "armário",
        ],
    ),
    rule("ério", 6, ""),
    rule("ês", 4, ""),
    rule("eza", 3, ""),
    rule("ez", 4, ""),
    rule("esco", 4, ""),
    rule_except(
        "ante",
        2,
        "",
        &["gigante", "elefante", "adiante", "possante", "instante", "restaurante"],
    ),
    rule_except("ástico", 4, "", &["eclesiástico"]),
    rule("alístico", 3, ""),
    rule("áutico", 4, ""),
    rule("êutico", 4, ""),
    rule_except(
        "tico",
        3,
        "",
        &[
            "político", "eclesiástico", "diagnostico", "prático", "doméstico", "diagnóstico",
            "idêntico", "alopático", "artístico", "autêntico", "eclético", "crítico",
            "critico",
        ],
    ),
    rule_except("ico", 4, "", &["tico", "público", "explico"]),
    rule("ividade", 5, ""),
    rule_except("idade", 4, "", &["autoridade", "comunidade"]),
    rule_except("oria", 4, "", &["categoria"]),
    rule("encial", 5, ""),
    rule("ista", 4, ""),
    rule("auta", 5, ""),
    rule("quice", 4, "c"),
    rule_except("ice", 4, "", &["cúmplice"]),
    rule("íaco", 3, ""),
    rule_except(
        "ente",
        4,
        "",
        &["freqüente", "alimente", "acrescente", "permanente", "oriente", "aparente"],
    ),
    rule("ense", 5, ""),
    rule("inal", 3, ""),
    rule("ano", 4, ""),
    rule_except("ável", 2, "", &["afável", "razoável", "potável", "vulnerável"]),
    rule_except("ível", 3, "", &["possível"]),
    rule_except("vel", 5, "", &["possível", "vulnerável", "solúvel"]),
    rule("bil", 3, "vel"),
    rule_except("ura", 4, "", &["imatura", "acupuntura", "costura"]),
    rule("ural", 4, ""),
    rule_except("ual", 3, "", &["bissexual", "virtual", "visual", "pontual"]),
    rule("ial", 3, ""),
    rule_except(
        "al",
        4,
        "",
        &[
            "afinal", "animal", "estatal", "bissexual", "desleal", "fiscal", "formal",
            "pessoal", "liberal", "postal", "virtual", "visual", "pontual", "sideral",
            "sucursal",
        ],
    ),
    rule("alismo", 4, ""),
    rule("ivismo", 4, ""),
    rule_except("ismo", 3, "", &["cinismo"]),
];

static VERB: &[Rule] = &[
    rule("aríamo", 2, ""),
    rule("ássemo", 2, ""),
    rule("eríamo", 2, ""),
    rule("êssemo", 2, ""),
    rule("iríamo", 3, ""),
    rule("íssemo", 3, ""),
    rule("áramo", 2, ""),
    rule("árei", 2, ""),
    rule("aremo", 2, ""),
    rule("ariam", 2, ""),
    rule("aríei", 2, ""),
    rule("ássei", 2, ""),
    rule("assem", 2, ""),
    rule("ávamo", 2, ""),
    rule("êramo", 3, ""),
    rule("eremo", 3, ""),
    rule("eriam", 3, ""),
    rule("eríei", 3, ""),
    rule("êssei", 3, ""),
    rule("essem", 3, ""),
    rule("íramo", 3, ""),
    rule("iremo", 3, ""),
    rule("iriam", 3, ""),
    rule("iríei", 3, ""),
    rule("íssei", 3, ""),
    rule("issem", 3, ""),
    rule("ando", 2, ""),
    rule("endo", 3, ""),
    rule("indo", 3, ""),
    rule("ondo", 3, ""),
    rule("aram", 2, ""),
    rule("arão", 2, ""),
    rule("arde", 2, ""),
    rule("arei", 2, ""),
    rule("arem", 2, ""),
    rule("aria", 2, ""),
    rule("armo", 2, ""),
    rule("asse", 2, ""),
    rule("aste", 2, ""),
    rule_except("avam", 2, "", &["agravam"]),
    rule("ávei", 2, ""),
    rule("eram", 3, ""),
    rule("erão", 3, ""),
    rule("erde", 3, ""),
    rule("erei", 3, ""),
    rule("êrei", 3, ""),
    rule("erem", 3, ""),
    rule("eria", 3, ""),
    rule("ermo", 3, ""),
    rule("esse", 3, ""),
    rule_except("este", 3, "", &["faroeste", "agreste"]),
    rule("íamo", 3, ""),
    rule("iram", 3, ""),
    rule("íram", 3, ""),
    rule("irão", 2, ""),
    rule("irde", 2, ""),
    rule_except("irei", 3, "", &["admirei"]),
    rule_except("irem", 3, "", &["adquirem"]),
    rule("iria", 3, ""),
    rule("irmo", 3, ""),
    rule("isse", 3, ""),
    rule("iste", 4, ""),
    rule_except("iava", 4, "", &["ampliava"]),
    rule("amo", 2, ""),
    rule("iona", 3, ""),
    rule_except("ara", 2, "", &["arara", "prepara"]),
    rule_except("ará", 2, "", &["alvará"]),
    rule_except("are", 2, "", &["prepare"]),
    rule_except("ava", 2, "", &["agrava"]),
    rule("emo", 2, ""),
    rule_except("era", 3, "", &["acelera", "espera"]),
    rule("erá", 3, ""),
    rule_except("ere", 3, "", &["espere"]),
    rule_except("iam", 3, "", &["enfiam", "ampliam", "elogiam", "ensaiam"]),
    rule("íei", 3, ""),
    rule_except("imo", 3, "", &["reprimo", "intimo", "íntimo", "nimo", "queimo", "ximo"]),
    rule_except("ira", 3, "", &["fronteira", "sátira"]),
    rule("ído", 3, ""),
    rule("irá", 3, ""),
    rule_except("tizar", 4, "", &["alfabetizar"]),
    rule_except("izar", 5, "", &["organizar"]),
    rule_except("itar", 5, "", &["acreditar", "explicitar", "estreitar"]),
    rule_except("ire", 3, "", &["adquire"]),
    rule("omo", 3, ""),
    rule("ai", 2, ""),
    rule("am", 2, ""),
    rule_except("ear", 4, "", &["alardear", "nuclear"]),
    rule_except("ar", 2, "", &["azar", "bazaar", "patamar"]),
    rule("uei", 3, ""),
    rule("uía", 5, "u"),
    rule("ei", 3, ""),
    rule("guem", 3, "g"),
    rule_except("em", 2, "", &["alem", "virgem"]),
    rule_except("er", 2, "", &["éter", "pier"]),
    rule_except("eu", 3, "", &["chapeu"]),
    rule_except(
        "ia",
        3,
        "",
        &[
            "estória", "fatia", "acia", "praia", "elogia", "mania", "lábia", "aprecia",
            "polícia", "arredia", "cheia", "ásia",
        ],
    ),
    rule_except("ir", 3, "", &["freir"]),
    rule("iu", 3, ""),
    rule("eou", 5, ""),
    rule("ou", 3, ""),
    rule("i", 3, ""),
];

static VOWEL: &[Rule] = &[
    rule("bil", 2, "vel"),
    rule_except("gue", 2, "g", &["gangue", "jegue"]),
    rule("á", 3, ""),
    rule_except("ê", 3, "", &["bebê"]),
    rule_except("a", 3, "", &["ásia"]),
    rule("e", 3, ""),
    rule_except("o", 3, "", &["ão"]),
];
