//! UriBuffer

#![no_main]

use routebuf::{BufferValueString, UriBuffer, UriBufferParams};

libfuzzer_sys::fuzz_target!(|data: (String, Vec<(u8, BufferValueString, String)>, u16, bool)| {
  let (base, ops, max_len, encode_slashes) = data;
  let params = UriBufferParams::default()
    .set_encode_slashes(encode_slashes)
    .set_max_len(max_len.into())
    .set_max_pending(8);
  let Ok(mut uri) = UriBuffer::with_base(&base, params) else {
    assert!(base.len() > usize::from(max_len));
    return;
  };
  for (op, value, text) in ops {
    let prev = String::from(uri.as_str());
    let prev_pending = uri.pending().len();
    let rslt = match op % 6 {
      0 => uri.buffer(value.to_ref()),
      1 => uri.accept(value.to_ref()),
      2 => uri.push_segment(&text),
      3 => uri.query_writer().write(&text, value.value()).map(|_| ()),
      4 => {
        let _ = uri.discard_pending();
        Ok(())
      }
      _ => {
        uri.truncate_with_base();
        assert_eq!(uri.as_str(), base);
        Ok(())
      }
    };
    if rslt.is_err() {
      assert_eq!(uri.as_str(), prev);
      if op % 6 != 3 {
        assert_eq!(uri.pending().len(), prev_pending);
      }
    }
    assert!(uri.as_str().starts_with(base.as_str()));
    assert!(uri.len() <= usize::from(max_len));
  }
  let _rslt = uri.finish();
});
