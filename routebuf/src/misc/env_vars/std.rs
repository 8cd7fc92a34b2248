use crate::misc::{EnvVars, FromVars, str_split_once1};
use alloc::{string::String, vec::Vec};
use std::{
  env, fs,
  io::{self, BufRead as _, BufReader, Read},
  path::{Path, PathBuf},
};

impl<T> EnvVars<T>
where
  T: FromVars,
{
  /// Tries reading from [`Self::from_process`] and then fallbacks to [`Self::from_nearest_env_file`].
  ///
  /// Intended for development purposes.
  #[inline]
  pub fn from_available() -> crate::Result<Self> {
    if let Ok(elem) = Self::from_process() {
      return Ok(elem);
    }
    Self::from_nearest_env_file()
  }

  /// Constructs `T` through the deserialization of a literal `.env` data.
  ///
  /// Intended for debugging or tests.
  #[inline]
  pub fn from_env_data(data: &[u8]) -> crate::Result<Self> {
    Ok(Self(T::from_vars(env(data)?)?))
  }

  /// Constructs `T` through the deserialization of the passed `.env` file.
  #[inline]
  pub fn from_env_path<P>(path: P) -> crate::Result<Self>
  where
    P: AsRef<Path>,
  {
    Ok(Self(T::from_vars(env(fs::File::open(path)?)?)?))
  }

  /// Tries to find an `.env` file starting at the current location until the root directory.
  #[inline]
  pub fn from_nearest_env_file() -> crate::Result<Self> {
    let mut buffer = env::current_dir()?;
    find_file(&mut buffer, Path::new(".env"))?;
    Ok(Self(T::from_vars(env(fs::File::open(buffer)?)?)?))
  }

  /// Constructs `T` according to all the environment variables of the current process.
  #[inline]
  pub fn from_process() -> crate::Result<Self> {
    Ok(Self(T::from_vars(env::vars())?))
  }
}

fn env<R>(read: R) -> crate::Result<Vec<(String, String)>>
where
  R: Read,
{
  let mut buf_reader = BufReader::new(read);
  let mut buffer = String::new();
  let mut vars = Vec::new();
  loop {
    buffer.clear();
    if buf_reader.read_line(&mut buffer)? == 0 {
      break;
    }
    let line = buffer.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }
    let Some((key, value)) = str_split_once1(line, b'=') else {
      continue;
    };
    vars.push((unquote(key), unquote(value)));
  }
  Ok(vars)
}

fn find_file(buffer: &mut PathBuf, path: &Path) -> io::Result<()> {
  buffer.push(path);
  match fs::metadata(&buffer) {
    Ok(elem) => {
      if elem.is_file() {
        return Ok(());
      }
    }
    Err(err) => {
      if err.kind() != io::ErrorKind::NotFound {
        return Err(err);
      }
    }
  }
  let _ = buffer.pop();
  if buffer.pop() {
    find_file(buffer, path)
  } else {
    Err(io::Error::new(io::ErrorKind::NotFound, "`.env` file not found"))
  }
}

fn unquote(str: &str) -> String {
  let trimmed = str.trim();
  let inner = trimmed
    .strip_prefix('\'')
    .and_then(|elem| elem.strip_suffix('\''))
    .or_else(|| trimmed.strip_prefix('"').and_then(|elem| elem.strip_suffix('"')))
    .unwrap_or(trimmed);
  String::from(inner)
}

#[cfg(test)]
mod tests {
  use crate::misc::env_vars::std::env;

  #[test]
  fn comments_and_quotes_are_handled() {
    let data = "# routebuf\nROUTEBUF_MAX_LEN='2048'\n\nROUTEBUF_LOWERCASE_URLS = \"true\"\nGARBAGE";
    let result = env(data.as_bytes()).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0], ("ROUTEBUF_MAX_LEN".into(), "2048".into()));
    assert_eq!(result[1], ("ROUTEBUF_LOWERCASE_URLS".into(), "true".into()));
  }
}
