/// ベンダー形式の動画レコード
///
/// Field59 のXMLレスポンスをそのままの形で保持する。
/// レスポンスごとに生成され、正規化（`domain::video::map_to_canonical`）後に捨てられる。
/// 欠けている要素は空文字列・空リストで表す。

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorVideo {
    /// ベンダー側の一意キー（唯一の安定した識別子）
    pub key: String,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    /// 直接再生URL
    pub url: String,
    /// アダプティブストリーミングURL
    pub adaptive_stream: String,
    /// 整数秒の文字列、または `HH:MM:SS` / `MM:SS`
    pub duration: String,
    pub summary: String,
    pub description: String,
    /// サムネイル（フルサイズ）
    pub thumbnail: String,
    pub thumbnail_medium: String,
    pub thumbnail_small: String,
    pub playlists: Vec<String>,
    pub created_date: String,
    pub last_modified_date: String,
    pub live_date: String,
    pub owner: String,
    pub user: String,
}
