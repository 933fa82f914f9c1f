//! Parser for `netstat -na` socket listings.

use crate::error::Result;
use crate::records::SocketRecord;

/// Parse socket rows out of `netstat -na`.
///
/// The listing interleaves per-protocol sections; `Active ...` banners
/// and `Proto ...` column headers are skipped, as are rows from
/// sections whose queue columns are not numeric (the unix-domain
/// section has a different shape entirely). States are respelled the
/// way `ss` spells them.
pub fn parse(text: &str) -> Result<Vec<SocketRecord>> {
    let mut sockets = Vec::new();

    for line in text.lines() {
        if line.is_empty() || line.starts_with("Active") || line.starts_with("Proto") {
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 5 {
            continue;
        }
        let (Ok(recv_q), Ok(send_q)) = (cols[1].parse::<u64>(), cols[2].parse::<u64>())
        else {
            continue;
        };

        let (local_addr, local_port) = split_endpoint(cols[3]);
        let (peer_addr, peer_port) = split_endpoint(cols[4]);
        let state = if cols.len() >= 6 {
            ss_state(cols[5])
        } else {
            "UNKNOWN".to_string()
        };

        sockets.push(SocketRecord {
            netid: cols[0].to_lowercase(),
            state,
            recv_q,
            send_q,
            local_addr,
            local_port,
            peer_addr,
            peer_port,
        });
    }

    Ok(sockets)
}

/// Split netstat's `addr.port` endpoint on the last dot. Wildcard
/// endpoints (`*.*`) and portless tokens get a `*` port.
fn split_endpoint(endpoint: &str) -> (String, String) {
    match endpoint.rsplit_once('.') {
        Some((addr, port)) => (addr.to_string(), port.to_string()),
        None => (endpoint.to_string(), "*".to_string()),
    }
}

/// Respell a BSD socket state the way `ss` prints it.
fn ss_state(state: &str) -> String {
    match state {
        "ESTABLISHED" => "ESTAB".to_string(),
        "CLOSE_WAIT" => "CLOSE-WAIT".to_string(),
        other => other.to_string(),
    }
}
