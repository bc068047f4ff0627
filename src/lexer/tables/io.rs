// src/lexer/tables/io.rs
use std::{
    io::{BufWriter, Write},
    path::Path,
    time::Instant,
};

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{
    ALPHABET, DfaTables, StateId, TokenType, sentinel_token,
    tokens::{NONE_I64, NONE_U16},
};

// -------------------- JSON (de)serialization --------------------

#[serde_as]
#[derive(Serialize, Deserialize)]
struct TablesDisk {
    n_states: u32,
    #[serde_as(as = "Vec<[_; 256]>")]
    next: Vec<[i64; ALPHABET]>,
    accept: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    names: Vec<String>,
}

impl From<&DfaTables> for TablesDisk {
    fn from(t: &DfaTables) -> Self {
        let next = (0..t.n_states())
            .map(|s| {
                let mut row = [NONE_I64; ALPHABET];
                for (b, to) in t.row(StateId(s as u32)).iter().enumerate() {
                    if let Some(to) = to {
                        row[b] = to.0 as i64;
                    }
                }
                row
            })
            .collect();
        Self {
            n_states: t.n_states() as u32,
            next,
            accept: t
                .accept_table()
                .iter()
                .map(|a| a.map_or(NONE_I64, |tk| tk.0 as i64))
                .collect(),
            names: t.names().to_vec(),
        }
    }
}

impl TablesDisk {
    fn into_tables(self) -> Result<DfaTables> {
        if self.next.len() != self.n_states as usize {
            bail!(
                "n_states={} but {} transition rows present",
                self.n_states,
                self.next.len()
            );
        }
        let mut next = Vec::with_capacity(self.next.len() * ALPHABET);
        for row in &self.next {
            for &v in row {
                next.push(if v < 0 {
                    None
                } else {
                    Some(StateId(
                        u32::try_from(v).map_err(|_| anyhow!("state id {v} does not fit in u32"))?,
                    ))
                });
            }
        }
        let accept = self
            .accept
            .iter()
            .map(|&v| sentinel_token(v))
            .collect::<Result<Vec<_>>>()?;
        Ok(DfaTables::new(self.n_states as usize, next, accept)?.with_names(self.names))
    }
}

pub fn save_tables_json(path: &Path, t: &DfaTables) -> Result<()> {
    let instant = Instant::now();
    let f = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, &TablesDisk::from(t))?;
    w.flush()?;
    log::debug!(
        "saved {} states to {} in {} ms",
        t.n_states(),
        path.display(),
        instant.elapsed().as_millis()
    );
    Ok(())
}

pub fn load_tables_json_bytes(data: &[u8]) -> Result<DfaTables> {
    serde_json::from_slice::<TablesDisk>(data)
        .context("failed to parse tables JSON")?
        .into_tables()
}

// -------------------- Packed binary (u16 entries) --------------------
//   magic: 8 bytes = "MUNCHDFA"
//   u32:   n_states
//   u32:   reserved (0)
//   u16:   next[n_states * 256]   // row-major, 0xFFFF = no transition
//   u16:   accept[n_states]       // 0xFFFF = not accepting

const BIN_MAGIC: &[u8; 8] = b"MUNCHDFA";
const HEADER_LEN: usize = 8 + 4 + 4;

fn pack_u16(v: Option<u32>, what: &str) -> Result<u16> {
    match v {
        None => Ok(NONE_U16),
        Some(v) => u16::try_from(v)
            .ok()
            .filter(|&x| x != NONE_U16)
            .ok_or_else(|| anyhow!("{what} {v} does not fit the packed u16 format")),
    }
}

pub fn save_tables_bin(path: &Path, t: &DfaTables) -> Result<()> {
    let instant = Instant::now();
    let n = t.n_states();
    let total_len = HEADER_LEN + n * ALPHABET * 2 + n * 2;

    let mut bytes = Vec::with_capacity(total_len);
    bytes.extend_from_slice(BIN_MAGIC);
    bytes.extend_from_slice(&(n as u32).to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    for s in 0..n {
        for to in t.row(StateId(s as u32)) {
            let v = pack_u16(to.map(|s| s.0), "state id")?;
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
    for tk in t.accept_table() {
        let v = pack_u16(tk.map(|tk| tk.0), "token type")?;
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    debug_assert_eq!(bytes.len(), total_len);

    let f = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    w.write_all(&bytes)?;
    w.flush()?;
    log::debug!(
        "saved {} bytes (~{:.1} KiB) to {} in {} ms",
        total_len,
        total_len as f64 / 1024.0,
        path.display(),
        instant.elapsed().as_millis()
    );
    Ok(())
}

#[inline]
fn take_u32(buf: &mut &[u8]) -> Result<u32> {
    if buf.len() < 4 {
        bail!("truncated u32");
    }
    let mut le = [0u8; 4];
    le.copy_from_slice(&buf[..4]);
    *buf = &buf[4..];
    Ok(u32::from_le_bytes(le))
}

#[inline]
fn take_u16(buf: &mut &[u8]) -> Result<u16> {
    if buf.len() < 2 {
        bail!("truncated u16");
    }
    let mut le = [0u8; 2];
    le.copy_from_slice(&buf[..2]);
    *buf = &buf[2..];
    Ok(u16::from_le_bytes(le))
}

#[inline]
fn unpack_u16(v: u16) -> Option<u32> {
    (v != NONE_U16).then_some(v as u32)
}

pub fn load_tables_bin_bytes(mut data: &[u8]) -> Result<DfaTables> {
    if data.len() < HEADER_LEN {
        bail!("tables .bin too short");
    }
    if &data[..8] != BIN_MAGIC {
        bail!("bad magic in tables .bin");
    }
    data = &data[8..];

    let n_states = take_u32(&mut data)? as usize;
    let _reserved = take_u32(&mut data)?;

    let ne_len = n_states
        .checked_mul(ALPHABET)
        .ok_or_else(|| anyhow!("n_states overflow"))?;
    // Size the payload from the header before allocating anything for it.
    let payload = ne_len
        .checked_add(n_states)
        .and_then(|entries| entries.checked_mul(2))
        .ok_or_else(|| anyhow!("n_states overflow"))?;
    if data.len() < payload {
        bail!(
            "truncated tables .bin: header says {n_states} states ({payload} bytes), {} present",
            data.len()
        );
    }
    let mut next = Vec::with_capacity(ne_len);
    for _ in 0..ne_len {
        next.push(unpack_u16(take_u16(&mut data)?).map(StateId));
    }

    let mut accept = Vec::with_capacity(n_states);
    for _ in 0..n_states {
        accept.push(unpack_u16(take_u16(&mut data)?).map(TokenType));
    }

    if !data.is_empty() {
        log::warn!("ignoring {} trailing bytes in tables .bin", data.len());
    }

    DfaTables::new(n_states, next, accept)
}

/// Loads tables from disk, picking the format from the extension
/// (`.json`, anything else is read as the packed binary form).
pub fn load_tables(path: &Path) -> Result<DfaTables> {
    let instant = Instant::now();
    let data = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let tables = if is_json {
        load_tables_json_bytes(&data)
    } else {
        load_tables_bin_bytes(&data)
    }
    .with_context(|| format!("load tables from {}", path.display()))?;
    log::debug!(
        "loaded {} states from {} in {} ms",
        tables.n_states(),
        path.display(),
        instant.elapsed().as_millis()
    );
    Ok(tables)
}
