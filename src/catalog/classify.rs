//! Keyword-based icon classification.
//!
//! The lowercased `relative path + category` is scanned against an ordered
//! rule table; the first rule whose pattern matches supplies the icon.
//!
//! The table is a priority list. Specific terms (a barbershop, a restaurant)
//! sit above broad ones (documents, cars, generic tools) so that adding a rule
//! at the bottom never reclassifies an existing artifact. Patterns include
//! Spanish synonyms because the content mixes languages.
//!
//! Never match on `html`/`htm`: every relative path ends with one of them.

use regex::Regex;
use std::sync::LazyLock;

/// Icon returned when no rule matches.
pub const DEFAULT_ICON: &str = "📦";

/// One entry of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct IconRule {
    /// Regex alternation matched against the lowercased haystack
    pub keywords: &'static str,
    pub icon: &'static str,
}

const fn rule(keywords: &'static str, icon: &'static str) -> IconRule {
    IconRule { keywords, icon }
}

/// Ordered classification table. First match wins.
pub const ICON_RULES: &[IconRule] = &[
    rule(r"barber|barbería|barberia|peluquer|haircut", "💈"),
    rule(r"restaurant|\bmenu\b|\bmenú\b|recipe|receta|comida|cocina|\bfood", "🍽️"),
    rule(r"coffee|\bcafé|\bcafe\b", "☕"),
    rule(r"pizza", "🍕"),
    rule(r"\bgym\b|fitness|workout|entrenamiento|ejercicio", "🏋️"),
    rule(r"health|salud|medic|médic|doctor|clinic|clínica", "🩺"),
    rule(r"\bpets?\b|mascota|\bvet\b|\bdogs?\b|perro|\bcats?\b|\bgatos?\b", "🐾"),
    rule(
        r"financ|budget|presupuesto|money|dinero|\bloan|préstamo|prestamo|invoice|factura|\btax|impuesto|\bbank|banco",
        "💰",
    ),
    rule(r"calc", "🧮"),
    rule(
        r"clock|timer|reloj|temporizador|pomodoro|stopwatch|cronómetro|cronometro|countdown",
        "⏱️",
    ),
    rule(
        r"calendar|calendario|agenda|schedule|horario|booking|reserva|appointment|\bcitas?\b",
        "📅",
    ),
    rule(r"queue|\bturnos?\b|waitlist|\bfila\b", "🎟️"),
    rule(
        r"music|música|musica|\bsong|canción|cancion|audio|playlist|piano|\bdrum|guitar|metronom|metrónomo",
        "🎵",
    ),
    rule(
        r"\bgames?\b|juego|\bplay\b|jugar|puzzle|\bquiz|trivia|snake|tetris|sudoku|chess|ajedrez",
        "🎮",
    ),
    rule(
        r"photo|\bfotos?\b|\bimages?\b|imagen|camera|cámara|camara|gallery|galería|galeria",
        "📷",
    ),
    rule(r"video|película|pelicula|movie|\bfilm", "🎬"),
    rule(r"weather|clima|forecast|pronóstico|pronostico", "🌤️"),
    rule(
        r"\bmaps?\b|\bmapas?\b|location|ubicación|ubicacion|\bgps\b|travel|viaje|\btrip",
        "🗺️",
    ),
    rule(
        r"\bshop|\bstore|tienda|\bcart\b|carrito|ecommerce|inventory|inventario|\bprice|precio",
        "🛒",
    ),
    rule(
        r"educa|school|escuela|learn|aprender|\bstudy|estudio|course|\bcurso|flashcard|lesson|lección|leccion",
        "📚",
    ),
    rule(
        r"language|idioma|translat|traduc|dictionary|diccionario|vocab",
        "🌐",
    ),
    rule(
        r"\bmath|matemátic|matematic|algebra|álgebra|geometr|equation|ecuación|ecuacion",
        "📐",
    ),
    rule(
        r"chart|graph|gráfic|grafic|\bstats?\b|estadístic|estadistic|analytics|dashboard",
        "📊",
    ),
    rule(
        r"\bcolou?rs?\b|palette|paleta|gradient|design|diseño|diseno|\bcss\b",
        "🎨",
    ),
    rule(r"password|contraseña|contrasena|security|seguridad|encrypt|cifra|\bhash|\bqr\b", "🔐"),
    rule(r"\bcode\b|código|codigo|\bjson\b|regex|\bdev\b|programming|programación|\bapi\b", "💻"),
    rule(
        r"\btext|texto|\bwords?\b|palabra|markdown|editor|\bnotes?\b|\bnotas?\b|writing|escrib",
        "📝",
    ),
    rule(r"conver|\bunits?\b|unidad", "🔄"),
    rule(r"\btodo|\btasks?\b|\btareas?\b|checklist|\blista?s?\b", "✅"),
    rule(
        r"\bhome\b|\bcasa\b|\bhouse|hogar|real.estate|inmobiliaria|\brent|alquiler",
        "🏠",
    ),
    rule(
        r"document|\bpdf\b|\bfiles?\b|archivo|\bforms?\b|formulario|\breport|informe",
        "📄",
    ),
    rule(
        r"\bcars?\b|\bauto\b|coche|vehic|vehíc|parking|garage|garaje",
        "🚗",
    ),
    rule(
        r"\btools?\b|utilit|utilidad|herramienta|helper|generat|generador",
        "🛠️",
    ),
];

/// Compiled table, same order as [`ICON_RULES`].
static COMPILED_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ICON_RULES
        .iter()
        .map(|r| (Regex::new(r.keywords).unwrap(), r.icon))
        .collect()
});

/// Map an artifact to its icon. Deterministic and total.
pub fn classify(relative: &str, category: &str) -> &'static str {
    let haystack = haystack(relative, category);
    match_rule(&haystack).map_or(DEFAULT_ICON, |index| COMPILED_RULES[index].1)
}

/// Lowercased `relative + " " + category`.
fn haystack(relative: &str, category: &str) -> String {
    format!("{relative} {category}").to_lowercase()
}

/// Index of the first matching rule.
fn match_rule(haystack: &str) -> Option<usize> {
    COMPILED_RULES
        .iter()
        .position(|(re, _)| re.is_match(haystack))
}
