//! Pure CREATE address derivation.

use alloy_primitives::Address;

/// Computes the address a `CREATE` deployment from `deployer` at `nonce`
/// receives: `keccak256(rlp([deployer, nonce]))[12..]`.
pub fn create_address(deployer: Address, nonce: u64) -> Address {
    deployer.create(nonce)
}

/// Computes the addresses of the next `count` consecutive `CREATE`
/// deployments from `deployer`, starting at `start_nonce`.
pub fn create_sequence(deployer: Address, start_nonce: u64, count: u32) -> Vec<Address> {
    (0..u64::from(count)).map(|i| deployer.create(start_nonce + i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    // Reference vectors for the EVM CREATE derivation.
    const DEPLOYER: Address = address!("6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            create_address(DEPLOYER, 0),
            address!("cd234a471b72ba2f1ccf0a70fcaba648a5eecd8d")
        );
        assert_eq!(
            create_address(DEPLOYER, 1),
            address!("343c43a37d37dff08ae8c4a11544c718abb4fcf8")
        );
        assert_eq!(
            create_address(DEPLOYER, 2),
            address!("f778b86fa74e846c4f0a1fbd1335fe81c00a0c91")
        );
    }

    #[test]
    fn test_prediction_is_pure() {
        let first = create_sequence(DEPLOYER, 7, 4);
        let second = create_sequence(DEPLOYER, 7, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_consecutive_nonces_differ() {
        assert_ne!(create_address(DEPLOYER, 5), create_address(DEPLOYER, 6));
    }

    #[test]
    fn test_sequence_matches_singles() {
        let seq = create_sequence(DEPLOYER, 3, 3);
        assert_eq!(seq.len(), 3);
        for (i, addr) in seq.iter().enumerate() {
            assert_eq!(*addr, create_address(DEPLOYER, 3 + i as u64));
        }
    }

    #[test]
    fn test_empty_sequence() {
        assert!(create_sequence(DEPLOYER, 0, 0).is_empty());
    }
}
