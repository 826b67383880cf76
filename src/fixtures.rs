#[cfg(test)]
pub mod test {
    use std::path::PathBuf;

    use tempfile::TempDir;

    /// A realistic build manifest: globals, sources, a repeated key, comments
    /// and CRLF line endings mixed in.
    pub const MANIFEST: &str = "; hinterlib build manifest\n\
        tp=linux,gba\n\
        ver=0.4.1\n\
        \n\
        [zlib.src]\r\n\
        url=https://zlib.net/zlib-1.3.tar.gz\r\n\
        sha2_256sum=ff0ba4c292013dbc27530b3a81e1f9a813cd39de01ca5e0f8bf355702efa593e\n\
        \t; mirrors are tried in order\n\
        mirror=https://a.example/zlib.tar.gz\n\
        mirror=https://b.example/zlib.tar.gz\n\
        \n\
        [hinterlib.proj]\n\
        srcs=zlib\n\
        cflags= -O2 -Wall \n";

    /// Write `text` to `config.ini` in a fresh temp dir. Keep the `TempDir`
    /// alive for as long as the path is used.
    pub fn write_ini(text: impl AsRef<[u8]>) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, text).unwrap();
        (dir, path)
    }
}
