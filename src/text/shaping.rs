//! Arabic reshaping and bidirectional reordering.
//!
//! Word processors and PDF viewers without a shaping engine render Arabic
//! letters in their isolated forms and in logical order. [`reshape`] replaces
//! each letter with its contextual presentation form (U+FB50..U+FEFF) and
//! [`reorder`] applies the Unicode Bidirectional Algorithm line by line so
//! the result reads correctly when laid out left to right.

use std::borrow::Cow;

use unicode_bidi::BidiInfo;
use unicode_bidi_mirroring::get_mirrored;

use crate::error::Result;

/// Something that turns logical-order text into display-ready text.
pub trait TextShaper {
    /// Shape `text`. Implementations must return an empty string for empty input.
    fn shape(&self, text: &str) -> Result<String>;
}

/// Options for [`ArabicShaper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapingOptions {
    /// Keep harakat (diacritics) instead of deleting them.
    pub keep_harakat: bool,
    /// Reorder lines into visual order after reshaping.
    pub visual_order: bool,
}

impl ShapingOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or delete harakat.
    pub fn with_harakat(mut self, keep: bool) -> Self {
        self.keep_harakat = keep;
        self
    }

    /// Enable or disable bidi reordering.
    pub fn with_visual_order(mut self, visual_order: bool) -> Self {
        self.visual_order = visual_order;
        self
    }
}

impl Default for ShapingOptions {
    fn default() -> Self {
        Self {
            keep_harakat: false,
            visual_order: true,
        }
    }
}

/// Reshapes Arabic letters and reorders each line for display.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArabicShaper {
    options: ShapingOptions,
}

impl ArabicShaper {
    /// Create a shaper with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shaper with custom options.
    pub fn with_options(options: ShapingOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &ShapingOptions {
        &self.options
    }
}

impl TextShaper for ArabicShaper {
    fn shape(&self, text: &str) -> Result<String> {
        let reshaped = reshape_with(text, &self.options);
        if self.options.visual_order {
            Ok(reorder(&reshaped))
        } else {
            Ok(reshaped)
        }
    }
}

/// Shape `text`, falling back to the input unchanged if the shaper fails.
///
/// Failures are logged and never propagated.
pub fn shape_or_original(shaper: &dyn TextShaper, text: &str) -> String {
    match shaper.shape(text) {
        Ok(shaped) => shaped,
        Err(e) => {
            log::warn!("Failed to shape text, keeping original: {}", e);
            text.to_string()
        }
    }
}

/// Replace Arabic letters with their contextual forms using default options.
pub fn reshape(text: &str) -> String {
    reshape_with(text, &ShapingOptions::default())
}

/// Replace Arabic letters with their contextual forms.
pub fn reshape_with(text: &str, options: &ShapingOptions) -> String {
    let chars: Vec<char> = text
        .chars()
        .filter(|&c| options.keep_harakat || !is_harakah(c))
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut prev_joins_forward = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if is_harakah(c) {
            out.push(c);
            i += 1;
            continue;
        }

        if c == LAM {
            // Kept harakat between LAM and ALEF follow the ligature.
            let ligature = next_letter_index(&chars, i + 1)
                .and_then(|j| lam_alef(chars[j]).map(|forms| (j, forms)));
            if let Some((alef_at, [isolated, final_])) = ligature {
                out.push(if prev_joins_forward { final_ } else { isolated });
                out.extend(&chars[i + 1..alef_at]);
                prev_joins_forward = false;
                i = alef_at + 1;
                continue;
            }
        }

        match joining(c) {
            Some(letter) => {
                // A following LAM-ALEF pair joins like a plain LAM.
                let next_joins_back = next_letter(&chars, i + 1)
                    .and_then(joining)
                    .is_some_and(|j| j.joins_backward());
                out.push(letter.form(prev_joins_forward, next_joins_back));
                prev_joins_forward = letter.joins_forward();
            }
            None => {
                out.push(c);
                prev_joins_forward = false;
            }
        }
        i += 1;
    }

    out
}

/// Reorder every line of `text` into visual order.
///
/// Lines are reordered independently and line breaks are kept in place.
pub fn reorder(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match line.strip_suffix('\r') {
            Some(body) => {
                out.push_str(&reorder_line(body));
                out.push('\r');
            }
            None => out.push_str(&reorder_line(line)),
        }
    }
    out
}

fn reorder_line(line: &str) -> Cow<'_, str> {
    if line.is_empty() {
        return Cow::Borrowed(line);
    }

    let bidi = BidiInfo::new(line, None);
    if !bidi.has_rtl() {
        return Cow::Borrowed(line);
    }

    // Reverse right-to-left runs and mirror their brackets.
    let mut visual = String::with_capacity(line.len());
    for para in &bidi.paragraphs {
        let (levels, runs) = bidi.visual_runs(para, para.range.clone());
        for run in runs {
            let text = &line[run.clone()];
            if levels[run.start].is_rtl() {
                visual.extend(text.chars().rev().map(mirrored));
            } else {
                visual.push_str(text);
            }
        }
    }
    Cow::Owned(visual)
}

fn mirrored(c: char) -> char {
    get_mirrored(c).unwrap_or(c)
}

const LAM: char = '\u{0644}';

/// How a letter connects to its neighbours, with its presentation forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joining {
    /// Joins on both sides: isolated, final, initial, medial.
    Dual([char; 4]),
    /// Joins only to the preceding letter: isolated, final.
    Right([char; 2]),
    /// Never joins.
    Isolated(char),
}

impl Joining {
    fn joins_forward(self) -> bool {
        matches!(self, Joining::Dual(_))
    }

    fn joins_backward(self) -> bool {
        !matches!(self, Joining::Isolated(_))
    }

    fn form(self, joined_before: bool, joined_after: bool) -> char {
        match self {
            Joining::Dual([isolated, final_, initial, medial]) => {
                match (joined_before, joined_after) {
                    (false, false) => isolated,
                    (true, false) => final_,
                    (false, true) => initial,
                    (true, true) => medial,
                }
            }
            Joining::Right([isolated, final_]) => {
                if joined_before {
                    final_
                } else {
                    isolated
                }
            }
            Joining::Isolated(isolated) => isolated,
        }
    }
}

fn next_letter(chars: &[char], from: usize) -> Option<char> {
    next_letter_index(chars, from).map(|i| chars[i])
}

fn next_letter_index(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len()).find(|&i| !is_harakah(chars[i]))
}

fn is_harakah(c: char) -> bool {
    matches!(c,
        '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E4}'
        | '\u{06E7}'
        | '\u{06E8}'
        | '\u{06EA}'..='\u{06ED}')
}

fn lam_alef(alef: char) -> Option<[char; 2]> {
    match alef {
        '\u{0622}' => Some(['\u{FEF5}', '\u{FEF6}']),
        '\u{0623}' => Some(['\u{FEF7}', '\u{FEF8}']),
        '\u{0625}' => Some(['\u{FEF9}', '\u{FEFA}']),
        '\u{0627}' => Some(['\u{FEFB}', '\u{FEFC}']),
        _ => None,
    }
}

fn joining(c: char) -> Option<Joining> {
    use Joining::{Dual, Isolated, Right};

    let joining = match c {
        '\u{0621}' => Isolated('\u{FE80}'),
        '\u{0622}' => Right(['\u{FE81}', '\u{FE82}']),
        '\u{0623}' => Right(['\u{FE83}', '\u{FE84}']),
        '\u{0624}' => Right(['\u{FE85}', '\u{FE86}']),
        '\u{0625}' => Right(['\u{FE87}', '\u{FE88}']),
        '\u{0626}' => Dual(['\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}']),
        '\u{0627}' => Right(['\u{FE8D}', '\u{FE8E}']),
        '\u{0628}' => Dual(['\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}']),
        '\u{0629}' => Right(['\u{FE93}', '\u{FE94}']),
        '\u{062A}' => Dual(['\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}']),
        '\u{062B}' => Dual(['\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}']),
        '\u{062C}' => Dual(['\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}']),
        '\u{062D}' => Dual(['\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}']),
        '\u{062E}' => Dual(['\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}']),
        '\u{062F}' => Right(['\u{FEA9}', '\u{FEAA}']),
        '\u{0630}' => Right(['\u{FEAB}', '\u{FEAC}']),
        '\u{0631}' => Right(['\u{FEAD}', '\u{FEAE}']),
        '\u{0632}' => Right(['\u{FEAF}', '\u{FEB0}']),
        '\u{0633}' => Dual(['\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}']),
        '\u{0634}' => Dual(['\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}']),
        '\u{0635}' => Dual(['\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}']),
        '\u{0636}' => Dual(['\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}']),
        '\u{0637}' => Dual(['\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}']),
        '\u{0638}' => Dual(['\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}']),
        '\u{0639}' => Dual(['\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}']),
        '\u{063A}' => Dual(['\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}']),
        '\u{0640}' => Dual(['\u{0640}', '\u{0640}', '\u{0640}', '\u{0640}']),
        '\u{0641}' => Dual(['\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}']),
        '\u{0642}' => Dual(['\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}']),
        '\u{0643}' => Dual(['\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}']),
        '\u{0644}' => Dual(['\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}']),
        '\u{0645}' => Dual(['\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}']),
        '\u{0646}' => Dual(['\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}']),
        '\u{0647}' => Dual(['\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}']),
        '\u{0648}' => Right(['\u{FEED}', '\u{FEEE}']),
        '\u{0649}' => Dual(['\u{FEEF}', '\u{FEF0}', '\u{FBE8}', '\u{FBE9}']),
        '\u{064A}' => Dual(['\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}']),
        // Persian and Urdu letters
        '\u{0671}' => Right(['\u{FB50}', '\u{FB51}']),
        '\u{067E}' => Dual(['\u{FB56}', '\u{FB57}', '\u{FB58}', '\u{FB59}']),
        '\u{0686}' => Dual(['\u{FB7A}', '\u{FB7B}', '\u{FB7C}', '\u{FB7D}']),
        '\u{0698}' => Right(['\u{FB8A}', '\u{FB8B}']),
        '\u{06A9}' => Dual(['\u{FB8E}', '\u{FB8F}', '\u{FB90}', '\u{FB91}']),
        '\u{06AF}' => Dual(['\u{FB92}', '\u{FB93}', '\u{FB94}', '\u{FB95}']),
        '\u{06CC}' => Dual(['\u{FBFC}', '\u{FBFD}', '\u{FBFE}', '\u{FBFF}']),
        _ => return None,
    };
    Some(joining)
}
