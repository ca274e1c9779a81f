/// Field59 のXMLレスポンス解析
///
/// ドキュメント内の任意の深さにある対象要素（`video` など）を1回の走査で集め、
/// 各要素の子要素テキストを表に従って `VendorVideo` へ詰める。
/// 欠けた要素は空文字列になり、解析エラーにはしない。
/// 値は前後の空白も含めてそのまま残す。
/// 構文エラーに当たった場合は、それまでに閉じた要素だけを返す。
use crate::api::types::VendorVideo;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use tracing::{debug, warn};

/// CDATA の開始・終了マーカー
const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// `VendorVideo` のテキスト項目
#[derive(Debug, Clone, Copy)]
enum VideoField {
    Key,
    Title,
    Category,
    Url,
    AdaptiveStream,
    Duration,
    Summary,
    Description,
    Thumbnail,
    ThumbnailMedium,
    ThumbnailSmall,
    CreatedDate,
    LastModifiedDate,
    LiveDate,
    Owner,
    User,
}

/// 項目とXMLタグ名の対応表
const VIDEO_FIELDS: &[(VideoField, &str)] = &[
    (VideoField::Key, "key"),
    (VideoField::Title, "title"),
    (VideoField::Category, "category"),
    (VideoField::Url, "url"),
    (VideoField::AdaptiveStream, "adaptiveStream"),
    (VideoField::Duration, "duration"),
    (VideoField::Summary, "summary"),
    (VideoField::Description, "description"),
    (VideoField::Thumbnail, "thumb"),
    (VideoField::ThumbnailMedium, "thumbMedium"),
    (VideoField::ThumbnailSmall, "thumbSmall"),
    (VideoField::CreatedDate, "createdDate"),
    (VideoField::LastModifiedDate, "lastModifiedDate"),
    (VideoField::LiveDate, "liveDate"),
    (VideoField::Owner, "owner"),
    (VideoField::User, "user"),
];

/// リスト項目として集める (親要素, 子要素) の組
const TAG_GROUP: (&str, &str) = ("tags", "tag");
const PLAYLIST_GROUP: (&str, &str) = ("playlists", "playlist");

impl VideoField {
    fn slot(self, video: &mut VendorVideo) -> &mut String {
        match self {
            Self::Key => &mut video.key,
            Self::Title => &mut video.title,
            Self::Category => &mut video.category,
            Self::Url => &mut video.url,
            Self::AdaptiveStream => &mut video.adaptive_stream,
            Self::Duration => &mut video.duration,
            Self::Summary => &mut video.summary,
            Self::Description => &mut video.description,
            Self::Thumbnail => &mut video.thumbnail,
            Self::ThumbnailMedium => &mut video.thumbnail_medium,
            Self::ThumbnailSmall => &mut video.thumbnail_small,
            Self::CreatedDate => &mut video.created_date,
            Self::LastModifiedDate => &mut video.last_modified_date,
            Self::LiveDate => &mut video.live_date,
            Self::Owner => &mut video.owner,
            Self::User => &mut video.user,
        }
    }
}

/// 対象要素1つ分の抽出結果
///
/// 子要素のテキストはすべて `strip_cdata` 済み。
#[derive(Debug, Default)]
struct RawElement {
    /// 要素自身のテキスト内容（子孫のテキストを連結したもの、未加工）
    text: String,
    /// 子孫要素名 -> テキスト。同名要素は最初の出現を採用する
    fields: HashMap<String, String>,
    tags: Vec<String>,
    playlists: Vec<String>,
}

impl RawElement {
    fn record(&mut self, parent: Option<&str>, name: &str, text: &str) {
        let value = strip_cdata(text);
        match (parent, name) {
            (Some(p), n) if (p, n) == TAG_GROUP => self.tags.push(value),
            (Some(p), n) if (p, n) == PLAYLIST_GROUP => self.playlists.push(value),
            _ => {
                self.fields.entry(name.to_string()).or_insert(value);
            }
        }
    }

    fn field(&self, tag: &str) -> String {
        self.fields.get(tag).cloned().unwrap_or_default()
    }

    fn text(&self) -> String {
        strip_cdata(&self.text)
    }

    fn into_video(self) -> VendorVideo {
        let mut video = VendorVideo::default();
        for (field, tag) in VIDEO_FIELDS {
            *field.slot(&mut video) = self.field(tag);
        }
        video.tags = self.tags;
        video.playlists = self.playlists;
        video
    }
}

/// テキストからCDATAの包みを取り除く
///
/// パーサが解釈したCDATAセクションの中身はそのまま通る。ここで扱うのは、
/// エスケープされて届いた `<![CDATA[x]]>` や、マーカーが剥がれかけた
/// `[CDATA[x]]` のようにテキストとして残った包み。
/// 包みの判定だけ前後の空白を無視し、中身と包みの無いテキストは加工しない。
pub fn strip_cdata(raw: &str) -> String {
    let candidate = raw.trim();
    candidate
        .strip_prefix(CDATA_OPEN)
        .and_then(|s| s.strip_suffix(CDATA_CLOSE))
        .or_else(|| {
            candidate
                .strip_prefix("[CDATA[")
                .and_then(|s| s.strip_suffix("]]"))
        })
        .unwrap_or(raw)
        .to_string()
}

/// 値をCDATAで包む
///
/// 値に含まれる `]]>` はセクションを分割して表現する。
pub fn wrap_cdata(value: &str) -> String {
    format!(
        "{}{}{}",
        CDATA_OPEN,
        value.replace(CDATA_CLOSE, "]]]]><![CDATA[>"),
        CDATA_CLOSE
    )
}

/// 動画作成リクエストのXMLボディを組み立てる
pub fn build_create_body(source_url: &str, title: &str) -> String {
    format!(
        "<video><title>{}</title><url>{}</url></video>",
        wrap_cdata(title),
        wrap_cdata(source_url)
    )
}

/// 開いている対象要素
struct OpenTarget {
    /// `open` スタック上の位置
    depth: usize,
    /// 結果の中での位置（開始タグの順）
    slot: usize,
    element: RawElement,
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// ドキュメントから `target` という名前の要素をすべて集める
///
/// 対象要素が入れ子になっていても、それぞれを1件として返す。
/// 子要素はいちばん内側の対象要素に記録される。
fn collect_elements(xml: &str, target: &str) -> Vec<RawElement> {
    let mut reader = Reader::from_str(xml);

    // 開始タグの順に枠を確保し、閉じた要素だけを埋める
    let mut slots: Vec<Option<RawElement>> = Vec::new();
    let mut targets: Vec<OpenTarget> = Vec::new();
    // 開いている全要素の (要素名, テキスト) のスタック
    let mut open: Vec<(String, String)> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                if name == target {
                    targets.push(OpenTarget {
                        depth: open.len(),
                        slot: slots.len(),
                        element: RawElement::default(),
                    });
                    slots.push(None);
                }
                open.push((name, String::new()));
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(&e);
                if name == target {
                    slots.push(Some(RawElement::default()));
                } else if let Some(current) = targets.last_mut() {
                    let parent = open.last().map(|(n, _)| n.as_str());
                    current.element.record(parent, &name, "");
                }
            }
            Ok(Event::Text(t)) if !targets.is_empty() => {
                let text = match t.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(e) => {
                        warn!(error = %e, "invalid escape in text node, keeping raw text");
                        String::from_utf8_lossy(&t).into_owned()
                    }
                };
                // 子要素の間の改行・インデントは値に含めない
                if !text.trim().is_empty() {
                    append_text(&targets, &mut open, &text);
                }
            }
            Ok(Event::CData(c)) if !targets.is_empty() => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                append_text(&targets, &mut open, &text);
            }
            Ok(Event::End(_)) => {
                let Some((name, text)) = open.pop() else {
                    continue;
                };
                let closes_target = targets.last().is_some_and(|t| t.depth == open.len());
                if closes_target {
                    if let Some(mut finished) = targets.pop() {
                        finished.element.text = text;
                        if let Some(slot) = slots.get_mut(finished.slot) {
                            *slot = Some(finished.element);
                        }
                    }
                } else if let Some(current) = targets.last_mut() {
                    let parent = open.last().map(|(n, _)| n.as_str());
                    current.element.record(parent, &name, &text);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(
                    position = reader.buffer_position(),
                    error = %e,
                    kept = slots.iter().flatten().count(),
                    "malformed XML, keeping elements parsed so far"
                );
                break;
            }
        }
    }

    slots.into_iter().flatten().collect()
}

/// テキストを、いちばん外側の対象要素から内側で開いている全要素に追加する
fn append_text(targets: &[OpenTarget], open: &mut [(String, String)], text: &str) {
    let from = targets.first().map_or(open.len(), |t| t.depth);
    for (_, buffer) in open.iter_mut().skip(from) {
        buffer.push_str(text);
    }
}

/// 一覧・詳細レスポンスから動画レコードを取り出す
///
/// `video` 要素の数と順序はそのまま保たれる。
pub fn parse_videos(xml: &str) -> Vec<VendorVideo> {
    let videos: Vec<VendorVideo> = collect_elements(xml, "video")
        .into_iter()
        .map(RawElement::into_video)
        .collect();
    debug!(count = videos.len(), "parsed video elements");
    videos
}

/// 作成レスポンスから動画キーを取り出す
///
/// 最初の空でない `key` 要素の値（前後の空白は除く）。見つからなければ None。
pub fn parse_key(xml: &str) -> Option<String> {
    collect_elements(xml, "key")
        .into_iter()
        .map(|element| element.text().trim().to_string())
        .find(|key| !key.is_empty())
}

/// エラーレスポンスからベンダーのメッセージを取り出す
///
/// `message` 要素を優先し、無ければ `error` 要素のテキストを使う。
/// エラーペイロードとして読めない場合は None。
pub fn parse_error_message(xml: &str) -> Option<String> {
    ["message", "error"].iter().find_map(|tag| {
        collect_elements(xml, tag)
            .into_iter()
            .map(|element| element.text().trim().to_string())
            .find(|text| !text.is_empty())
    })
}
