use std::io::Cursor;

// bytes left between the cursor and the end of the message
pub fn remaining(rdr: &Cursor<&[u8]>) -> usize {
    let len = rdr.get_ref().len() as u64;
    len.saturating_sub(rdr.position()) as usize
}
