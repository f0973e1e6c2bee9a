#![allow(dead_code)]

use qurani_core::{Navigator, RenderOptions, SqliteStore, INVOCATION};
use rusqlite::{params, Connection};

pub const FATIHA: &str = "سُورَةُ الفَاتِحَةِ";
pub const BAQARAH: &str = "سُورَةُ البَقَرَةِ";
pub const NAS: &str = "سُورَةُ النَّاسِ";

/// (number, chapter, number in chapter, text, page, hizb quarter, hizb, juz)
type Row = (u32, u32, u32, String, u32, u32, u32, u32);

fn chapter_name(chapter: u32) -> &'static str {
    match chapter {
        1 => FATIHA,
        2 => BAQARAH,
        _ => NAS,
    }
}

fn rows() -> Vec<Row> {
    let fatiha = [
        INVOCATION.to_string(),
        "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ".to_string(),
        "الرَّحْمَٰنِ الرَّحِيمِ".to_string(),
        "مَالِكِ يَوْمِ الدِّينِ".to_string(),
        "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ".to_string(),
        "اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ".to_string(),
        "صِرَاطَ الَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ الْمَغْضُوبِ عَلَيْهِمْ وَلَا الضَّالِّينَ".to_string(),
    ];
    let baqarah = [
        format!("{} الم", INVOCATION),
        "ذَٰلِكَ الْكِتَابُ لَا رَيْبَ ۛ فِيهِ ۛ هُدًى لِّلْمُتَّقِينَ".to_string(),
        "الَّذِينَ يُؤْمِنُونَ بِالْغَيْبِ وَيُقِيمُونَ الصَّلَاةَ وَمِمَّا رَزَقْنَاهُمْ يُنفِقُونَ".to_string(),
        "وَالَّذِينَ يُؤْمِنُونَ بِمَا أُنزِلَ إِلَيْكَ وَمَا أُنزِلَ مِن قَبْلِكَ وَبِالْآخِرَةِ هُمْ يُوقِنُونَ".to_string(),
        "أُولَٰئِكَ عَلَىٰ هُدًى مِّن رَّبِّهِمْ ۖ وَأُولَٰئِكَ هُمُ الْمُفْلِحُونَ".to_string(),
        "إِنَّ الَّذِينَ كَفَرُوا سَوَاءٌ عَلَيْهِمْ أَأَنذَرْتَهُمْ أَمْ لَمْ تُنذِرْهُمْ لَا يُؤْمِنُونَ".to_string(),
        "خَتَمَ اللَّهُ عَلَىٰ قُلُوبِهِمْ وَعَلَىٰ سَمْعِهِمْ ۖ وَعَلَىٰ أَبْصَارِهِمْ غِشَاوَةٌ ۖ وَلَهُمْ عَذَابٌ عَظِيمٌ".to_string(),
        "وَمِنَ النَّاسِ مَن يَقُولُ آمَنَّا بِاللَّهِ وَبِالْيَوْمِ الْآخِرِ وَمَا هُم بِمُؤْمِنِينَ".to_string(),
        "يُخَادِعُونَ اللَّهَ وَالَّذِينَ آمَنُوا وَمَا يَخْدَعُونَ إِلَّا أَنفُسَهُمْ وَمَا يَشْعُرُونَ".to_string(),
        "فِي قُلُوبِهِم مَّرَضٌ فَزَادَهُمُ اللَّهُ مَرَضًا ۖ وَلَهُم عَذَابٌ أَلِيمٌ بِمَا كَانُوا يَكْذِبُونَ".to_string(),
    ];
    let nas = [
        format!("{} قُلْ أَعُوذُ بِرَبِّ النَّاسِ", INVOCATION),
        "مَلِكِ النَّاسِ".to_string(),
        "إِلَٰهِ النَّاسِ".to_string(),
        "مِن شَرِّ الْوَسْوَاسِ الْخَنَّاسِ".to_string(),
        "الَّذِي يُوَسْوِسُ فِي صُدُورِ النَّاسِ".to_string(),
        "مِنَ الْجِنَّةِ وَالنَّاسِ".to_string(),
    ];

    let mut rows = Vec::new();
    for (i, text) in fatiha.into_iter().enumerate() {
        let n = i as u32 + 1;
        rows.push((n, 1, n, text, 1, 1, 1, 1));
    }
    for (i, text) in baqarah.into_iter().enumerate() {
        let n = i as u32 + 1;
        let page = if n <= 5 { 2 } else { 3 };
        rows.push((7 + n, 2, n, text, page, 1, 1, 1));
    }
    for (i, text) in nas.into_iter().enumerate() {
        let n = i as u32 + 1;
        rows.push((6230 + n, 114, n, text, 604, 240, 60, 30));
    }
    rows
}

pub fn populate(conn: &Connection) {
    conn.execute_batch(
        "CREATE TABLE quran (
            text TEXT NOT NULL,
            number INTEGER PRIMARY KEY,
            sura_name TEXT NOT NULL,
            sura_number INTEGER NOT NULL,
            numberInSurah INTEGER NOT NULL,
            page INTEGER NOT NULL,
            hizb INTEGER NOT NULL,
            hizbQuarter INTEGER NOT NULL,
            juz INTEGER NOT NULL
        );",
    )
    .unwrap();

    let mut insert = conn
        .prepare(
            "INSERT INTO quran (text, number, sura_name, sura_number, numberInSurah, page, hizb, hizbQuarter, juz)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .unwrap();
    for (number, chapter, in_chapter, text, page, quarter, hizb, juz) in rows() {
        insert
            .execute(params![
                text,
                number,
                chapter_name(chapter),
                chapter,
                in_chapter,
                page,
                hizb,
                quarter,
                juz
            ])
            .unwrap();
    }
}

pub fn store() -> SqliteStore {
    let conn = Connection::open_in_memory().unwrap();
    populate(&conn);
    SqliteStore::from_connection(conn).unwrap()
}

pub fn navigator() -> Navigator<SqliteStore> {
    Navigator::new(store(), RenderOptions::default())
}

pub fn line_navigator() -> Navigator<SqliteStore> {
    Navigator::new(
        store(),
        RenderOptions {
            show_verse_number: true,
            one_verse_per_line: true,
        },
    )
}
