// Key material shared by the fast and basic signers, and the signer trait

use crate::codec::to_byte;
use crate::error::{QrlError, Result};
use crate::hashing::{shake256, HashFunction};
use crate::qrl::address::{address_from_pk, ADDRESS_SIZE};
use crate::qrl::descriptor::{
    AddrFormatType, QrlDescriptor, SignatureType, DESCRIPTOR_SIZE, EXTENDED_PK_SIZE,
    EXTENDED_SEED_SIZE, SEED_SIZE,
};
use crate::xmss::config::{XmssParams, SECRET_KEY_SIZE};
use crate::xmss::cursor::{LeafCursor, OneTimeLeaf};
use crate::xmss::hash::{h_msg, prf, Node, N};
use crate::xmss::signature;
use crate::xmss::tree::TreeContext;
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

#[derive(Zeroize, ZeroizeOnDrop)]
struct SecretSeeds {
    seed: [u8; SEED_SIZE],
    sk_seed: Node,
    sk_prf: Node,
}

/// Seeds, root, descriptor and leaf cursor of one XMSS keypair
pub struct XmssKey {
    secret: SecretSeeds,
    pub_seed: Node,
    root: Node,
    address: [u8; ADDRESS_SIZE],
    descriptor: QrlDescriptor,
    params: XmssParams,
    cursor: LeafCursor,
}

impl fmt::Debug for XmssKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmssKey")
            .field("descriptor", &self.descriptor)
            .field("params", &self.params)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl XmssKey {
    /// Split `seed` into sk_seed || sk_prf || pub_seed via SHAKE256(96, seed).
    /// The root is left zero until [`XmssKey::with_root`].
    ///
    /// Preconditions:
    /// - seed.len() == 48
    /// - height satisfies the BDS rule and fits the descriptor (<= 30)
    pub(crate) fn derive(
        seed: &[u8],
        height: u8,
        hash_function: HashFunction,
        address_format: AddrFormatType,
        wots_w: u32,
    ) -> Result<Self> {
        if seed.len() != SEED_SIZE {
            return Err(QrlError::InvalidParameters(
                "Seed should be 48 bytes".to_string(),
            ));
        }
        let params = XmssParams::new(u32::from(height), wots_w)?;
        let descriptor =
            QrlDescriptor::new(hash_function, SignatureType::XMSS, height, address_format)?;

        let randombits = Zeroizing::new(shake256(3 * N, seed)?);
        let mut secret = SecretSeeds {
            seed: [0u8; SEED_SIZE],
            sk_seed: [0u8; N],
            sk_prf: [0u8; N],
        };
        secret.seed.copy_from_slice(seed);
        secret.sk_seed.copy_from_slice(&randombits[..N]);
        secret.sk_prf.copy_from_slice(&randombits[N..2 * N]);
        let mut pub_seed = [0u8; N];
        pub_seed.copy_from_slice(&randombits[2 * N..]);

        debug!(height, hash = hash_function.name(), "derived XMSS seeds");
        Ok(Self {
            secret,
            pub_seed,
            root: [0u8; N],
            address: [0u8; ADDRESS_SIZE],
            descriptor,
            params,
            cursor: LeafCursor::new(params.lifetime()),
        })
    }

    /// Install the tree root and derive the address from the resulting public key
    pub(crate) fn with_root(mut self, root: Node) -> Result<Self> {
        self.root = root;
        self.address = address_from_pk(&self.pk())?;
        Ok(self)
    }

    pub(crate) fn tree_context(&self) -> TreeContext<'_> {
        TreeContext {
            hash_fn: self.descriptor.hash_function(),
            wots: self.params.wots,
            sk_seed: &self.secret.sk_seed,
            pub_seed: &self.pub_seed,
        }
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut LeafCursor {
        &mut self.cursor
    }

    pub fn cursor(&self) -> &LeafCursor {
        &self.cursor
    }

    /// idx || R || WOTS+(H_msg) || auth_path for a claimed leaf.
    ///
    /// Preconditions:
    /// - auth_path is the authentication path of `leaf`
    pub(crate) fn sign_leaf(&self, leaf: OneTimeLeaf, message: &[u8], auth_path: &[Node]) -> Vec<u8> {
        let hash_fn = self.descriptor.hash_function();
        let index = leaf.index();

        let mut index_bytes = [0u8; 32];
        index_bytes.copy_from_slice(&to_byte(u64::from(index), 32));
        let r = prf(hash_fn, &index_bytes, &self.secret.sk_prf);
        let digest = h_msg(hash_fn, message, &r, &self.root, u64::from(index));

        let wots_signature = leaf
            .into_wots_key(hash_fn, self.params.wots, &self.secret.sk_seed, &self.pub_seed)
            .sign(&digest);
        signature::encode(index, &r, &wots_signature, auth_path)
    }

    /// descriptor || root || pub_seed
    pub fn pk(&self) -> [u8; EXTENDED_PK_SIZE] {
        let mut out = [0u8; EXTENDED_PK_SIZE];
        out[..DESCRIPTOR_SIZE].copy_from_slice(&self.descriptor.to_bytes());
        out[DESCRIPTOR_SIZE..DESCRIPTOR_SIZE + N].copy_from_slice(&self.root);
        out[DESCRIPTOR_SIZE + N..].copy_from_slice(&self.pub_seed);
        out
    }

    pub fn address(&self) -> [u8; ADDRESS_SIZE] {
        self.address
    }

    /// idx (4, big-endian) || sk_seed || sk_prf || pub_seed || root
    pub fn sk(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(Vec::with_capacity(SECRET_KEY_SIZE));
        out.extend_from_slice(&self.index().to_be_bytes());
        out.extend_from_slice(&self.secret.sk_seed);
        out.extend_from_slice(&self.secret.sk_prf);
        out.extend_from_slice(&self.pub_seed);
        out.extend_from_slice(&self.root);
        out
    }

    /// descriptor || seed
    pub fn extended_seed(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(Vec::with_capacity(EXTENDED_SEED_SIZE));
        out.extend_from_slice(&self.descriptor.to_bytes());
        out.extend_from_slice(&self.secret.seed);
        out
    }

    pub fn seed(&self) -> &[u8] {
        &self.secret.seed
    }

    pub fn sk_seed(&self) -> &Node {
        &self.secret.sk_seed
    }

    pub fn sk_prf(&self) -> &Node {
        &self.secret.sk_prf
    }

    pub fn pk_seed(&self) -> &Node {
        &self.pub_seed
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn height(&self) -> u8 {
        self.descriptor.height()
    }

    /// Next leaf to be signed with; equals `number_signatures()` once exhausted
    pub fn index(&self) -> u32 {
        self.cursor.position() as u32
    }

    pub fn descriptor(&self) -> &QrlDescriptor {
        &self.descriptor
    }

    pub fn params(&self) -> &XmssParams {
        &self.params
    }

    pub fn number_signatures(&self) -> u64 {
        self.cursor.lifetime()
    }

    pub fn remaining_signatures(&self) -> u64 {
        self.cursor.remaining()
    }

    pub fn signature_size(&self) -> usize {
        self.params.signature_size()
    }
}

/// Operations common to every stateful XMSS signer
pub trait XmssSigner {
    fn key(&self) -> &XmssKey;

    /// Sign with the next unused leaf.
    ///
    /// Postconditions:
    /// - The returned signature is `signature_size()` bytes and verifies
    ///   against `pk()`
    /// - `index()` has advanced by one
    /// - Returns Err(Exhausted) once every leaf is used
    fn sign(&mut self, message: &[u8]) -> Result<Vec<u8>>;

    /// Skip forward to leaf `new_index`.
    ///
    /// Preconditions:
    /// - index() <= new_index < number_signatures()
    fn set_index(&mut self, new_index: u32) -> Result<()>;

    fn pk(&self) -> [u8; EXTENDED_PK_SIZE] {
        self.key().pk()
    }

    fn address(&self) -> [u8; ADDRESS_SIZE] {
        self.key().address()
    }

    fn sk(&self) -> Zeroizing<Vec<u8>> {
        self.key().sk()
    }

    fn height(&self) -> u8 {
        self.key().height()
    }

    fn index(&self) -> u32 {
        self.key().index()
    }

    fn descriptor(&self) -> &QrlDescriptor {
        self.key().descriptor()
    }

    fn number_signatures(&self) -> u64 {
        self.key().number_signatures()
    }

    fn remaining_signatures(&self) -> u64 {
        self.key().remaining_signatures()
    }

    fn signature_size(&self) -> usize {
        self.key().signature_size()
    }

    /// Stateless verification against an extended public key (w = 16)
    fn verify(message: &[u8], signature: &[u8], extended_pk: &[u8]) -> Result<bool>
    where
        Self: Sized,
    {
        crate::xmss::verify::verify(message, signature, extended_pk)
    }
}
