//! Collection database layout (schema version 11) and the JSON blobs stored
//! in its `col` row.

use crate::template::{CardTemplate, CSS, FIELD_NAMES, MODEL_NAME, TEMPLATES};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: i64 = 11;

/// ID of the deck and options group every collection carries.
pub const DEFAULT_DECK_ID: i64 = 1;

pub const SCHEMA_SQL: &str = r#"
CREATE TABLE col (
    id              integer primary key,
    crt             integer not null,
    mod             integer not null,
    scm             integer not null,
    ver             integer not null,
    dty             integer not null,
    usn             integer not null,
    ls              integer not null,
    conf            text not null,
    models          text not null,
    decks           text not null,
    dconf           text not null,
    tags            text not null
);
CREATE TABLE notes (
    id              integer primary key,
    guid            text not null,
    mid             integer not null,
    mod             integer not null,
    usn             integer not null,
    tags            text not null,
    flds            text not null,
    sfld            integer not null,
    csum            integer not null,
    flags           integer not null,
    data            text not null
);
CREATE TABLE cards (
    id              integer primary key,
    nid             integer not null,
    did             integer not null,
    ord             integer not null,
    mod             integer not null,
    usn             integer not null,
    type            integer not null,
    queue           integer not null,
    due             integer not null,
    ivl             integer not null,
    factor          integer not null,
    reps            integer not null,
    lapses          integer not null,
    left            integer not null,
    odue            integer not null,
    odid            integer not null,
    flags           integer not null,
    data            text not null
);
CREATE TABLE revlog (
    id              integer primary key,
    cid             integer not null,
    usn             integer not null,
    ease            integer not null,
    ivl             integer not null,
    lastIvl         integer not null,
    factor          integer not null,
    time            integer not null,
    type            integer not null
);
CREATE TABLE graves (
    usn             integer not null,
    oid             integer not null,
    type            integer not null
);
CREATE INDEX ix_notes_usn on notes (usn);
CREATE INDEX ix_cards_usn on cards (usn);
CREATE INDEX ix_revlog_usn on revlog (usn);
CREATE INDEX ix_cards_nid on cards (nid);
CREATE INDEX ix_cards_sched on cards (did, queue, due);
CREATE INDEX ix_revlog_cid on revlog (cid);
CREATE INDEX ix_notes_csum on notes (csum);
"#;

/// Separator between field values in `notes.flds`.
pub const FIELD_SEPARATOR: &str = "\x1f";

#[derive(Debug, Serialize)]
struct NoteTypeJson {
    id: i64,
    name: &'static str,
    #[serde(rename = "type")]
    kind: u8,
    #[serde(rename = "mod")]
    modified: i64,
    usn: i64,
    sortf: u32,
    did: i64,
    tmpls: Vec<TemplateJson>,
    flds: Vec<FieldJson>,
    css: &'static str,
    #[serde(rename = "latexPre")]
    latex_pre: &'static str,
    #[serde(rename = "latexPost")]
    latex_post: &'static str,
    tags: Vec<String>,
    vers: Vec<String>,
    /// `[ordinal, "any", [field indices]]` per template.
    req: Vec<(usize, &'static str, &'static [u32])>,
}

#[derive(Debug, Serialize)]
struct TemplateJson {
    name: &'static str,
    ord: usize,
    qfmt: &'static str,
    afmt: &'static str,
    did: Option<i64>,
    bqfmt: &'static str,
    bafmt: &'static str,
}

#[derive(Debug, Serialize)]
struct FieldJson {
    name: &'static str,
    ord: usize,
    sticky: bool,
    rtl: bool,
    font: &'static str,
    size: u32,
    media: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckJson {
    id: i64,
    name: String,
    desc: String,
    #[serde(rename = "mod")]
    modified: i64,
    usn: i64,
    collapsed: bool,
    browser_collapsed: bool,
    #[serde(rename = "dyn")]
    dynamic: u8,
    conf: i64,
    extend_new: u32,
    extend_rev: u32,
    new_today: [i64; 2],
    rev_today: [i64; 2],
    lrn_today: [i64; 2],
    time_today: [i64; 2],
}

impl DeckJson {
    fn new(id: i64, name: &str, modified: i64) -> Self {
        Self {
            id,
            name: name.to_string(),
            desc: String::new(),
            modified,
            usn: -1,
            collapsed: false,
            browser_collapsed: false,
            dynamic: 0,
            conf: DEFAULT_DECK_ID,
            extend_new: 10,
            extend_rev: 50,
            new_today: [0, 0],
            rev_today: [0, 0],
            lrn_today: [0, 0],
            time_today: [0, 0],
        }
    }
}

fn template_json(ord: usize, t: &CardTemplate) -> TemplateJson {
    TemplateJson {
        name: t.name,
        ord,
        qfmt: t.front,
        afmt: t.back,
        did: None,
        bqfmt: "",
        bafmt: "",
    }
}

/// `col.models`: the single vocabulary note type, keyed by its ID.
pub fn models_json(model_id: i64, deck_id: i64, modified: i64) -> serde_json::Result<String> {
    let note_type = NoteTypeJson {
        id: model_id,
        name: MODEL_NAME,
        kind: 0,
        modified,
        usn: -1,
        sortf: 0,
        did: deck_id,
        tmpls: TEMPLATES
            .iter()
            .enumerate()
            .map(|(ord, t)| template_json(ord, t))
            .collect(),
        flds: FIELD_NAMES
            .iter()
            .enumerate()
            .map(|(ord, &name)| FieldJson {
                name,
                ord,
                sticky: false,
                rtl: false,
                font: "Arial",
                size: 20,
                media: Vec::new(),
            })
            .collect(),
        css: CSS,
        latex_pre: "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage[utf8]{inputenc}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n",
        latex_post: "\\end{document}",
        tags: Vec::new(),
        vers: Vec::new(),
        req: TEMPLATES
            .iter()
            .enumerate()
            .map(|(ord, t)| (ord, "any", t.required_fields))
            .collect(),
    };

    let mut models = BTreeMap::new();
    models.insert(model_id.to_string(), note_type);
    serde_json::to_string(&models)
}

/// `col.decks`: the default deck plus the generated one.
pub fn decks_json(deck_id: i64, deck_name: &str, modified: i64) -> serde_json::Result<String> {
    let mut decks = BTreeMap::new();
    decks.insert(
        DEFAULT_DECK_ID.to_string(),
        DeckJson::new(DEFAULT_DECK_ID, "Default", modified),
    );
    decks.insert(deck_id.to_string(), DeckJson::new(deck_id, deck_name, modified));
    serde_json::to_string(&decks)
}

/// `col.dconf`: the stock options group every deck points at.
pub fn deck_config_json(modified: i64) -> serde_json::Result<String> {
    let conf = json!({
        "1": {
            "id": DEFAULT_DECK_ID,
            "name": "Default",
            "mod": modified,
            "usn": 0,
            "maxTaken": 60,
            "autoplay": true,
            "timer": 0,
            "replayq": true,
            "dyn": false,
            "new": {
                "bury": true,
                "delays": [1.0, 10.0],
                "initialFactor": 2500,
                "ints": [1, 4, 7],
                "order": 1,
                "perDay": 20,
                "separate": true
            },
            "lapse": {
                "delays": [10.0],
                "leechAction": 0,
                "leechFails": 8,
                "minInt": 1,
                "mult": 0.0
            },
            "rev": {
                "bury": true,
                "ease4": 1.3,
                "fuzz": 0.05,
                "ivlFct": 1.0,
                "maxIvl": 36500,
                "minSpace": 1,
                "perDay": 100
            }
        }
    });
    serde_json::to_string(&conf)
}

/// `col.conf`: collection-wide settings.
pub fn collection_config_json(deck_id: i64, model_id: i64) -> serde_json::Result<String> {
    let conf = json!({
        "activeDecks": [deck_id],
        "curDeck": deck_id,
        "curModel": model_id.to_string(),
        "newSpread": 0,
        "collapseTime": 1200,
        "timeLim": 0,
        "estTimes": true,
        "dueCounts": true,
        "nextPos": 1,
        "sortType": "noteFld",
        "sortBackwards": false,
        "addToCur": true
    });
    serde_json::to_string(&conf)
}

/// Join field values into the `notes.flds` column.
pub fn join_fields(fields: &[&str]) -> String {
    fields.join(FIELD_SEPARATOR)
}
