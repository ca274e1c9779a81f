/// プレゼンテーション層: ユーザー入力処理
///
/// 認証情報と削除確認をユーザーから受け取ります。
/// 認証情報はこの実行の間だけメモリ上に置かれ、どこにも保存されません。
use crate::api::auth::{Credentials, PASSWORD_ENV, USER_ENV};
use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};

/// 対話的に認証情報を取得
pub fn read_credentials_interactive() -> Result<Credentials> {
    eprintln!("Field59 credentials are required.");
    eprintln!(
        "(Set {} and {} to skip this prompt, or use --mock.)",
        USER_ENV, PASSWORD_ENV
    );
    eprintln!();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let identifier = prompt_line(&mut input, "Username: ")?;
    if identifier.is_empty() {
        bail!("Username cannot be empty. Please provide a valid Field59 username.");
    }

    eprint!("Password: ");
    io::stderr().flush()?;
    let secret = read_raw_line(&mut input).context("Failed to read from input")?;
    if secret.is_empty() {
        bail!("Password cannot be empty. Please provide a valid Field59 password.");
    }

    Ok(Credentials::new(identifier, secret))
}

/// stdin からパイプで認証情報を取得（2行形式）
///
/// 形式:
///   1行目: Username
///   2行目: Password
pub fn read_credentials_from_stdin() -> Result<Credentials> {
    read_credentials_from(io::stdin().lock())
}

fn read_credentials_from(mut reader: impl BufRead) -> Result<Credentials> {
    let identifier = read_trimmed_line(&mut reader).context("Failed to read username from stdin")?;
    if identifier.is_empty() {
        bail!("Username cannot be empty. Please ensure the first line of stdin contains a valid username.");
    }

    let secret = read_raw_line(&mut reader).context("Failed to read password from stdin")?;
    if secret.is_empty() {
        bail!("Password cannot be empty. Please ensure the second line of stdin contains a valid password.");
    }

    Ok(Credentials::new(identifier, secret))
}

/// 削除の確認を求める
///
/// # Returns
/// "y" または "yes" が入力された場合のみ true
pub fn confirm_deletion(key: &str) -> Result<bool> {
    let stdin = io::stdin();
    let answer = prompt_line(
        &mut stdin.lock(),
        &format!("Delete video '{}'? This cannot be undone. [y/N]: ", key),
    )?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn prompt_line(reader: &mut impl BufRead, prompt: &str) -> Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;
    read_trimmed_line(reader).context("Failed to read from input")
}

fn read_trimmed_line(reader: &mut impl BufRead) -> io::Result<String> {
    Ok(read_raw_line(reader)?.trim().to_string())
}

/// 改行だけを取り除いた1行（パスワード用）
fn read_raw_line(reader: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let content_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(content_len);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_credentials_two_lines() {
        let credentials = read_credentials_from(Cursor::new("editor\nsecret\n")).unwrap();
        assert_eq!(credentials, Credentials::new("editor", "secret"));
    }

    #[test]
    fn test_read_credentials_keeps_password_spaces() {
        let credentials =
            read_credentials_from(Cursor::new(" editor \r\n  spaced pw \r\n")).unwrap();
        assert_eq!(credentials, Credentials::new("editor", "  spaced pw "));
    }

    #[test]
    fn test_read_credentials_rejects_missing_password() {
        assert!(read_credentials_from(Cursor::new("editor\n")).is_err());
        assert!(read_credentials_from(Cursor::new("")).is_err());
    }

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }
}
